use std::cell::RefCell;
use std::rc::Rc;

use qurve_core::{Disposer, Registry};

type Shared = Rc<RefCell<Registry<&'static str>>>;

fn register(reg: &Shared, name: &'static str) -> Disposer {
    let id = reg.borrow_mut().insert(name, name);
    let weak = Rc::downgrade(reg);
    Disposer::new(move || {
        if let Some(reg) = weak.upgrade() {
            reg.borrow_mut().remove(id);
        }
    })
}

fn names(reg: &Shared) -> Vec<&'static str> {
    reg.borrow().iter().map(|(_, _, v)| *v).collect()
}

#[test]
fn disposers_remove_only_their_own_entry() {
    let reg: Shared = Rc::new(RefCell::new(Registry::new()));
    let grid = register(&reg, "grid");
    let axis = register(&reg, "axis");
    let line = register(&reg, "line");
    assert_eq!(names(&reg), vec!["grid", "axis", "line"]);

    axis.dispose();
    assert_eq!(names(&reg), vec!["grid", "line"]);

    drop(grid);
    drop(line);
    assert!(reg.borrow().is_empty());
}

#[test]
fn disposer_outliving_registry_is_harmless() {
    let reg: Shared = Rc::new(RefCell::new(Registry::new()));
    let d = register(&reg, "orphan");
    drop(reg);
    d.dispose();
}

#[test]
fn snapshot_is_independent_of_later_changes() {
    let reg: Shared = Rc::new(RefCell::new(Registry::new()));
    let a = register(&reg, "a");
    let _b = register(&reg, "b");
    let snap = reg.borrow().snapshot();
    a.dispose();
    let snapped: Vec<&str> = snap.iter().map(|(_, _, v)| *v).collect();
    assert_eq!(snapped, vec!["a", "b"]);
    assert_eq!(names(&reg), vec!["b"]);
}
