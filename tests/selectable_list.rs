use selectable_list::{cloned, Identifiable, SelectableList, Status, ViewModel};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
struct Genre {
    id: String,
    name: String,
}

impl Identifiable for Genre {
    type Id = String;

    fn id(&self) -> String {
        self.id.clone()
    }
}

const DATA: [(&str, &str); 19] = [
    ("28", "Action"),
    ("12", "Adventure"),
    ("16", "Animation"),
    ("35", "Comedy"),
    ("80", "Crime"),
    ("99", "Documentary"),
    ("18", "Drama"),
    ("10751", "Family"),
    ("14", "Fantasy"),
    ("36", "History"),
    ("27", "Horror"),
    ("10402", "Music"),
    ("9648", "Mystery"),
    ("10749", "Romance"),
    ("878", "Science Fiction"),
    ("10770", "TV Movie"),
    ("53", "Thriller"),
    ("10752", "War"),
    ("37", "Western"),
];

fn data() -> Vec<Genre> {
    DATA.iter()
        .map(|(id, name)| Genre {
            id: id.to_string(),
            name: name.to_string(),
        })
        .collect()
}

fn genres() -> SelectableList<Genre> {
    SelectableList::new("genres")
}

/// Latest view-model as seen by a fresh subscriber.
fn emitted(list: &SelectableList<Genre>) -> ViewModel<Genre> {
    let latest = Rc::new(RefCell::new(None));
    let _sub = list
        .view_model()
        .subscribe(cloned!(latest => move |vm: &ViewModel<Genre>| {
            *latest.borrow_mut() = Some(vm.clone());
        }));
    let vm = latest.borrow_mut().take();
    vm.expect("view-model replays on subscribe")
}

// =============================================================================
// initialization
// =============================================================================

#[test]
fn initial_channels_emit_empty_idle_state() {
    let list = genres();
    assert!(list.list().get().is_empty());
    assert!(list.selected().get().is_empty());
    assert_eq!(list.status().get(), Status::Idle);

    let vm = emitted(&list);
    assert!(vm.list.is_empty());
    assert!(vm.selected.is_empty());
    assert_eq!(vm.status.value(), "idle");
}

// =============================================================================
// status
// =============================================================================

#[test]
fn status_follows_set_loading() {
    let list = genres();
    assert_eq!(emitted(&list).status.value(), "idle");

    list.set_loading(true);
    assert_eq!(emitted(&list).status.value(), "pending");

    list.set_loading(false);
    assert_eq!(emitted(&list).status.value(), "idle");
}

#[test]
fn status_is_success_after_add_items() {
    let list = genres();
    let data = data();
    list.set_loading(true);

    list.add_items([data[0].clone(), data[1].clone()]);
    assert_eq!(emitted(&list).status.value(), "success");

    list.set_loading(false);
    assert_eq!(emitted(&list).status.value(), "idle");
}

#[test]
fn set_loading_false_clears_error() {
    let list = genres();
    list.update_status(Status::error("network down"));
    assert_eq!(emitted(&list).status.value(), "error");

    list.set_loading(false);
    assert_eq!(emitted(&list).status, Status::Idle);
}

// =============================================================================
// add_items
// =============================================================================

#[test]
fn add_items_emits_total_items() {
    let list = genres();
    let data = data();

    list.add_items([data[0].clone(), data[1].clone()]);
    assert_eq!(emitted(&list).list.len(), 2);

    // Same items again: no change
    list.add_items([data[0].clone(), data[1].clone()]);
    assert_eq!(emitted(&list).list.len(), 2);

    list.add_items([data[2].clone(), data[3].clone()]);
    assert_eq!(emitted(&list).list.len(), 4);

    assert_eq!(emitted(&list).selected.len(), 0);
}

#[test]
fn add_items_with_clear_replaces_existing() {
    let list = genres();
    let data = data();

    list.add_items([data[0].clone(), data[1].clone()]);
    assert_eq!(emitted(&list).list.len(), 2);

    list.add_items_with([data[2].clone(), data[3].clone()], true);
    let vm = emitted(&list);
    assert_eq!(vm.list.len(), 2);
    assert_eq!(vm.list.ids().cloned().collect::<Vec<_>>(), vec!["16", "35"]);
}

// =============================================================================
// selections
// =============================================================================

fn with_four_items() -> (SelectableList<Genre>, Vec<Genre>) {
    let list = genres();
    let data = data();
    list.add_items(data[..4].to_vec());
    (list, data)
}

#[test]
fn select_items_merges_and_emits_total_selected() {
    let (list, data) = with_four_items();
    assert_eq!(emitted(&list).selected.len(), 0);

    list.select_items([data[1].clone(), data[3].clone()]);
    assert_eq!(emitted(&list).selected.len(), 2);

    list.select_items([data[2].clone()]);
    assert_eq!(emitted(&list).selected.len(), 3);

    list.select_items([data[2].clone()]);
    assert_eq!(emitted(&list).selected.len(), 3);
}

#[test]
fn select_items_with_clear_selects_only_new_items() {
    let (list, data) = with_four_items();
    assert_eq!(emitted(&list).selected.len(), 0);

    list.select_items([data[1].clone(), data[3].clone()]);
    assert_eq!(emitted(&list).selected.len(), 2);

    list.select_items_with([data[2].clone()], true);
    assert_eq!(emitted(&list).selected.len(), 1);

    list.select_items([data[1].clone()]);
    assert_eq!(emitted(&list).selected.len(), 2);
}

#[test]
fn select_all_selects_and_deselects_everything() {
    let (list, data) = with_four_items();
    list.add_items_with(data.clone(), true);

    assert_eq!(emitted(&list).list.len(), data.len());
    assert_eq!(emitted(&list).selected.len(), 0);

    list.select_all();
    assert_eq!(emitted(&list).selected.len(), data.len());

    // Idempotent
    list.select_all();
    let vm = emitted(&list);
    assert_eq!(vm.selected, vm.list);

    list.select_all_with(false);
    assert_eq!(emitted(&list).selected.len(), 0);
}

#[test]
fn select_items_by_id_uses_list_entries() {
    let (list, _) = with_four_items();

    list.select_items_by_id(["35".to_string(), "999".to_string(), "28".to_string()]);
    let selected = emitted(&list).selected;
    assert_eq!(selected.ids().cloned().collect::<Vec<_>>(), vec!["35", "28"]);
    assert_eq!(selected.get(&"35".to_string()).unwrap().name, "Comedy");
}

#[test]
fn selection_survives_list_replacement() {
    let (list, data) = with_four_items();
    list.select_items([data[0].clone()]);

    // Selection is not reconciled against the list.
    list.add_items_with([data[10].clone()], true);
    let vm = emitted(&list);
    assert_eq!(vm.list.len(), 1);
    assert_eq!(vm.selected.ids().cloned().collect::<Vec<_>>(), vec!["28"]);
}

// =============================================================================
// push delivery
// =============================================================================

#[test]
fn every_mutation_reaches_existing_subscribers_before_returning() {
    let list = genres();
    let data = data();
    let lens = Rc::new(RefCell::new(Vec::new()));
    let _sub = list
        .selected()
        .subscribe(cloned!(lens => move |s| lens.borrow_mut().push(s.len())));

    list.add_items(data.clone());
    list.select_items([data[0].clone()]);
    list.select_items([data[0].clone()]);
    list.select_all();
    list.select_all_with(false);

    assert_eq!(*lens.borrow(), vec![0, 1, 1, data.len(), 0]);
}

#[test]
fn independent_lists_share_nothing() {
    let a = SelectableList::new("genres");
    let b: SelectableList<Genre> = SelectableList::new("languages");
    a.add_items(data());
    a.select_all();

    assert!(b.list().get().is_empty());
    assert!(b.selected().get().is_empty());
    assert_eq!(b.status().get(), Status::Idle);
}
