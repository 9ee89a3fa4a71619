use tagnote_core::db::{open_db, open_db_in_memory};
use tagnote_core::{
    compose_views, filter_notes, KeyValueStore, KvRepository, MemoryKvStore, NoteData,
    NoteFilter, NotebookService, SqliteKvStore, Tag, NOTES_KEY, TAGS_KEY,
};

const REGISTRY_JSON: &str =
    r#"[{"id":"t1","label":"work"},{"id":"t2","label":"home"}]"#;
const NOTES_JSON: &str = r#"[
    {"id":"n1","title":"Groceries","markdown":"milk","tagIds":["t2"]},
    {"id":"n2","title":"Report","markdown":"draft","tagIds":["t1","t2"]}
]"#;

fn seeded_store() -> MemoryKvStore {
    let mut store = MemoryKvStore::new();
    store.set(TAGS_KEY, REGISTRY_JSON).unwrap();
    store.set(NOTES_KEY, NOTES_JSON).unwrap();
    store
}

fn seeded_service() -> NotebookService<KvRepository<MemoryKvStore>> {
    NotebookService::open(KvRepository::new(seeded_store())).unwrap()
}

fn ids(notes: &[tagnote_core::Note]) -> Vec<&str> {
    notes.iter().map(|note| note.id.as_str()).collect()
}

#[test]
fn selected_tags_filter_with_and_semantics() {
    let service = seeded_service();
    let home = Tag::with_id("t2", "home");
    let work = Tag::with_id("t1", "work");

    let both = filter_notes(&service.notes(), "", &[home.clone()]);
    assert_eq!(ids(&both), vec!["n1", "n2"]);

    let only_report = filter_notes(&service.notes(), "", &[home, work]);
    assert_eq!(ids(&only_report), vec!["n2"]);
}

#[test]
fn title_filter_is_case_insensitive() {
    let service = seeded_service();

    let hits = service.filter_notes(&NoteFilter::new("report", Vec::new()));
    assert_eq!(ids(&hits), vec!["n2"]);
}

#[test]
fn delete_tag_cascades_to_every_note() {
    let mut service = seeded_service();

    assert!(service.delete_tag("t2").unwrap());

    let views = service.notes();
    assert_eq!(views[0].id, "n1");
    assert!(views[0].tags.is_empty());
    assert_eq!(views[1].tags, vec![Tag::with_id("t1", "work")]);
    assert!(service
        .raw_notes()
        .iter()
        .all(|note| !note.tag_ids.iter().any(|id| id == "t2")));
    assert_eq!(service.tags(), &[Tag::with_id("t1", "work")]);
}

#[test]
fn delete_tag_cascade_is_persisted() {
    let mut service = seeded_service();
    service.delete_tag("t1").unwrap();

    let store = service.into_repo().into_inner();
    let reopened = NotebookService::open(KvRepository::new(store)).unwrap();
    assert_eq!(reopened.tags(), &[Tag::with_id("t2", "home")]);
    assert_eq!(reopened.raw_notes()[1].tag_ids, vec!["t2".to_string()]);
}

#[test]
fn compose_views_is_one_to_one_and_restricted_to_registry() {
    let service = seeded_service();
    let mut raw = service.raw_notes().to_vec();
    raw[0].tag_ids.push("dangling".to_string());

    let views = compose_views(&raw, service.tags());
    assert_eq!(views.len(), raw.len());
    for (view, note) in views.iter().zip(&raw) {
        assert!(view
            .tags
            .iter()
            .all(|tag| note.tag_ids.contains(&tag.id) && service.tags().contains(tag)));
    }
}

#[test]
fn update_note_is_idempotent() {
    let mut service = seeded_service();
    let data = NoteData::new("Report v2", "final", vec![Tag::with_id("t1", "work")]);

    assert!(service.update_note("n2", &data).unwrap());
    let once = service.raw_notes().to_vec();
    assert!(service.update_note("n2", &data).unwrap());

    assert_eq!(service.raw_notes(), once.as_slice());
    assert_eq!(once[1].title, "Report v2");
    assert_eq!(once[1].tag_ids, vec!["t1".to_string()]);
}

#[test]
fn adding_a_selected_tag_never_grows_the_result() {
    let mut service = seeded_service();
    let extra = service.add_tag("misc").unwrap();
    let mut selection: Vec<Tag> = Vec::new();
    let mut previous = service.notes().len();

    for tag in [
        Tag::with_id("t2", "home"),
        Tag::with_id("t1", "work"),
        extra,
    ] {
        selection.push(tag);
        let current = service
            .filter_notes(&NoteFilter::new("", selection.clone()))
            .len();
        assert!(current <= previous);
        previous = current;
    }
    assert_eq!(previous, 0);
}

#[test]
fn created_note_resolves_tags_in_registry_order() {
    let mut service = NotebookService::open(KvRepository::new(MemoryKvStore::new())).unwrap();
    let work = service.add_tag("work").unwrap();
    let home = service.add_tag("home").unwrap();

    let note_id = service
        .create_note(&NoteData::new("Plan", "# steps", vec![home.clone(), work.clone()]))
        .unwrap();

    let note = service.note(&note_id).expect("created note should exist");
    assert_eq!(note.title, "Plan");
    assert_eq!(note.tags, vec![work, home]);
    assert!(service.note("missing").is_none());
}

#[test]
fn duplicate_labels_are_allowed() {
    let mut service = NotebookService::open(KvRepository::new(MemoryKvStore::new())).unwrap();
    let first = service.add_tag("work").unwrap();
    let second = service.add_tag("work").unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(service.tags().len(), 2);
}

#[test]
fn delete_note_removes_only_target() {
    let mut service = seeded_service();

    assert!(service.delete_note("n1").unwrap());
    assert!(!service.delete_note("n1").unwrap());
    assert_eq!(ids(&service.notes()), vec!["n2"]);
    assert_eq!(service.tags().len(), 2);
}

#[test]
fn first_run_starts_empty() {
    let conn = open_db_in_memory().unwrap();
    let service = NotebookService::open(KvRepository::new(SqliteKvStore::new(&conn))).unwrap();

    assert!(service.tags().is_empty());
    assert!(service.notes().is_empty());
}

#[test]
fn sqlite_backed_notebook_persists_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notebook.db");

    let note_id = {
        let conn = open_db(&path).unwrap();
        let mut service =
            NotebookService::open(KvRepository::new(SqliteKvStore::new(&conn))).unwrap();
        let tag = service.add_tag("work").unwrap();
        service
            .create_note(&NoteData::new("Standup", "notes", vec![tag]))
            .unwrap()
    };

    let conn = open_db(&path).unwrap();
    let service = NotebookService::open(KvRepository::new(SqliteKvStore::new(&conn))).unwrap();
    let note = service.note(&note_id).expect("note should survive reopen");
    assert_eq!(note.title, "Standup");
    assert_eq!(note.tags.len(), 1);
    assert_eq!(note.tags[0].label, "work");

    let raw = SqliteKvStore::new(&conn).get(NOTES_KEY).unwrap().unwrap();
    assert!(raw.contains("\"tagIds\""));
}

#[test]
fn renamed_tag_is_reflected_in_views() {
    let mut service = seeded_service();

    assert!(service.update_tag_label("t2", "house").unwrap());
    let views = service.notes();
    assert_eq!(views[0].tags, vec![Tag::with_id("t2", "house")]);
    assert_eq!(views[1].tags[1].label, "house");
}
