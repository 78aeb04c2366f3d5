use super::*;
use crate::state::fetch::FetchState;

#[test]
fn local_cell_clones_share_state() {
    let cell = LocalCell::new(FetchState::<u32>::default());
    let other = cell.clone();
    other.update(|s| s.data = Some(7));
    assert_eq!(cell.snapshot().data, Some(7));
}

#[test]
fn signal_cell_reads_back_updates() {
    let signal = RwSignal::new(FetchState::<u32>::default());
    StateCell::update(&signal, |s| s.loading = true);
    assert!(StateCell::with(&signal, |s| s.loading));
    assert!(signal.snapshot().loading);
}
