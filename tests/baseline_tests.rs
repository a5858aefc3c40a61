// Baseline selector tests: phase classification and rotation, including the
// exact boundary behavior at one and two intervals.

mod common;

use check_jvm_gc::baseline::{select_baseline, BaselineSelector, Phase, Selection};
use check_jvm_gc::history_repo::{HistoryRepo, Slot};
use check_jvm_gc::models::GcSnapshot;
use common::{aged, current, snapshot, INTERVAL, NOW, PID};
use tempfile::TempDir;

const I: f64 = INTERVAL as f64;

fn select(slot1: Option<GcSnapshot>, slot2: Option<GcSnapshot>) -> Selection {
    select_baseline(&current(), slot1, slot2, INTERVAL)
}

fn assert_untouched(sel: &Selection) {
    assert!(sel.baseline.is_none());
    assert!(!sel.write_slot1);
    assert!(!sel.write_slot2);
}

fn assert_full_reset(sel: &Selection) {
    assert!(sel.baseline.is_none());
    assert!(sel.write_slot1);
    assert!(sel.write_slot2);
}

#[test]
fn test_first_run_is_initializing_and_seeds_both_slots() {
    let sel = select(None, None);
    assert_eq!(sel.phase, Phase::Initializing);
    assert_full_reset(&sel);
}

#[test]
fn test_restart_discards_both_slots() {
    // slot2 still matches, but one mismatching pid invalidates all history
    let stranger = snapshot(PID + 1, NOW - I, 5.0, 300.0);
    let sel = select(Some(stranger), Some(aged(2.0 * I)));
    assert_eq!(sel.phase, Phase::Initializing);
    assert_full_reset(&sel);

    let sel = select(Some(aged(I)), Some(snapshot(PID + 1, NOW - 2.0 * I, 5.0, 300.0)));
    assert_eq!(sel.phase, Phase::Initializing);
    assert_full_reset(&sel);
}

#[test]
fn test_too_early_when_both_slots_young() {
    // both slots one second short of a full interval
    let sel = select(Some(aged(I - 1.0)), Some(aged(I - 1.0)));
    assert_eq!(sel.phase, Phase::TooEarlySlot1);
    assert_untouched(&sel);
}

#[test]
fn test_too_early_with_young_slot1_and_stale_slot2() {
    // d1 = 99 < I, d2 = 250 >= 2I: no usable ~1-interval-old sample
    let sel = select(Some(aged(I - 1.0)), Some(aged(2.5 * I)));
    assert_eq!(sel.phase, Phase::TooEarlySlot1);
    assert_untouched(&sel);
}

#[test]
fn test_too_early_symmetric_roles_swapped() {
    let sel = select(Some(aged(2.0 * I)), Some(aged(I - 1.0)));
    assert_eq!(sel.phase, Phase::TooEarlySlot2);
    assert_untouched(&sel);
}

#[test]
fn test_use_slot1_at_exact_interval() {
    // equal timestamps rotate: slot1 is no older than slot2
    let sel = select(Some(aged(I)), Some(aged(I)));
    assert_eq!(sel.phase, Phase::UseSlot1);
    assert_eq!(sel.baseline, Some(aged(I)));
    assert!(!sel.write_slot1);
    assert!(sel.write_slot2);
}

#[test]
fn test_use_slot1_just_under_two_intervals() {
    let sel = select(Some(aged(2.0 * I - 1.0)), Some(aged(2.0 * I - 1.0)));
    assert_eq!(sel.phase, Phase::UseSlot1);
    assert_eq!(sel.baseline, Some(aged(2.0 * I - 1.0)));
    assert!(sel.write_slot2);
}

#[test]
fn test_use_slot1_skips_write_when_slot2_is_fresher() {
    // slot2 already holds the newer record: rotation is mid-cycle, read only
    let sel = select(Some(aged(2.0 * I - 1.0)), Some(aged(I - 1.0)));
    assert_eq!(sel.phase, Phase::UseSlot1);
    assert_eq!(sel.baseline, Some(aged(2.0 * I - 1.0)));
    assert!(!sel.write_slot1);
    assert!(!sel.write_slot2);
}

#[test]
fn test_use_slot2_when_slot1_hits_two_intervals() {
    // d1 = 2I falls out of the window (upper bound exclusive)
    let sel = select(Some(aged(2.0 * I)), Some(aged(I)));
    assert_eq!(sel.phase, Phase::UseSlot2);
    assert_eq!(sel.baseline, Some(aged(I)));
    assert!(sel.write_slot1);
    assert!(!sel.write_slot2);
}

#[test]
fn test_use_slot2_skips_write_when_slot1_is_fresher() {
    let sel = select(Some(aged(I - 1.0)), Some(aged(2.0 * I - 1.0)));
    assert_eq!(sel.phase, Phase::UseSlot2);
    assert_eq!(sel.baseline, Some(aged(2.0 * I - 1.0)));
    assert!(!sel.write_slot1);
    assert!(!sel.write_slot2);
}

#[test]
fn test_stale_history_resets_both_slots() {
    let sel = select(Some(aged(2.0 * I)), Some(aged(3.0 * I)));
    assert_eq!(sel.phase, Phase::Stale);
    assert_full_reset(&sel);

    let sel = select(Some(aged(3.0 * I)), Some(aged(2.0 * I)));
    assert_eq!(sel.phase, Phase::Stale);
    assert_full_reset(&sel);
}

#[test]
fn test_slot1_one_interval_old_slot2_two() {
    // the steady-state shape: slot1 ~1 interval old, slot2 ~2 intervals old
    let sel = select(Some(aged(I)), Some(aged(2.0 * I)));
    assert_eq!(sel.phase, Phase::UseSlot1);
    assert_eq!(sel.baseline, Some(aged(I)));
    assert!(sel.write_slot2);
}

#[test]
fn test_missing_slot2_young_slot1_is_too_early() {
    let sel = select(Some(aged(I / 2.0)), None);
    assert_eq!(sel.phase, Phase::TooEarlySlot1);
    assert_untouched(&sel);
}

#[test]
fn test_missing_slot2_ripe_slot1_rotates_into_slot2() {
    let sel = select(Some(aged(1.5 * I)), None);
    assert_eq!(sel.phase, Phase::UseSlot1);
    assert_eq!(sel.baseline, Some(aged(1.5 * I)));
    assert!(sel.write_slot2);
}

#[test]
fn test_missing_slot2_old_slot1_is_stale() {
    let sel = select(Some(aged(2.5 * I)), None);
    assert_eq!(sel.phase, Phase::Stale);
    assert_full_reset(&sel);
}

#[test]
fn test_missing_slot1_is_initializing_even_with_slot2() {
    let sel = select(None, Some(aged(I)));
    assert_eq!(sel.phase, Phase::Initializing);
    assert_full_reset(&sel);
}

#[test]
fn test_too_early_is_idempotent_after_seeding() {
    // freshly seeded history: both slots equal the current sample (d = 0);
    // repeated calls within the interval never mutate the slots
    let seeded = current();
    for _ in 0..3 {
        let sel = select(Some(seeded.clone()), Some(seeded.clone()));
        assert_eq!(sel.phase, Phase::TooEarlySlot1);
        assert_untouched(&sel);
    }
}

// Repo-backed selector: the same decisions driven through slot files.

#[test]
fn test_advance_seeds_both_slots_on_first_run() {
    let dir = TempDir::new().unwrap();
    let repo = HistoryRepo::new(dir.path());
    let selector = BaselineSelector::new(&repo, INTERVAL);

    let baseline = selector.advance(&current()).unwrap();
    assert!(baseline.is_none());
    assert_eq!(repo.load(Slot::One).unwrap(), Some(current()));
    assert_eq!(repo.load(Slot::Two).unwrap(), Some(current()));
}

#[test]
fn test_advance_too_early_leaves_files_untouched() {
    let dir = TempDir::new().unwrap();
    let repo = HistoryRepo::new(dir.path());
    let selector = BaselineSelector::new(&repo, INTERVAL);

    let old = aged(I - 1.0);
    repo.save(Slot::One, &old).unwrap();
    repo.save(Slot::Two, &old).unwrap();

    let baseline = selector.advance(&current()).unwrap();
    assert!(baseline.is_none());
    assert_eq!(repo.load(Slot::One).unwrap(), Some(old.clone()));
    assert_eq!(repo.load(Slot::Two).unwrap(), Some(old));
}

#[test]
fn test_advance_corrupt_slot_reinitializes() {
    let dir = TempDir::new().unwrap();
    let repo = HistoryRepo::new(dir.path());
    let selector = BaselineSelector::new(&repo, INTERVAL);

    std::fs::write(repo.slot_path(Slot::One), "not json").unwrap();
    repo.save(Slot::Two, &aged(I)).unwrap();

    let baseline = selector.advance(&current()).unwrap();
    assert!(baseline.is_none());
    assert_eq!(repo.load(Slot::One).unwrap(), Some(current()));
    assert_eq!(repo.load(Slot::Two).unwrap(), Some(current()));
}

#[test]
fn test_advance_alternates_slots_under_regular_cadence() {
    // on-time invocations: every call after the first yields a baseline
    // exactly one interval old, alternating which slot provides it
    let dir = TempDir::new().unwrap();
    let repo = HistoryRepo::new(dir.path());
    let selector = BaselineSelector::new(&repo, INTERVAL);

    let samples: Vec<_> = (0..4)
        .map(|i| snapshot(PID, NOW + i as f64 * I, 10.0 + i as f64, 500.0))
        .collect();

    assert_eq!(selector.advance(&samples[0]).unwrap(), None);
    assert_eq!(selector.advance(&samples[1]).unwrap(), Some(samples[0].clone()));
    assert_eq!(selector.advance(&samples[2]).unwrap(), Some(samples[1].clone()));
    assert_eq!(selector.advance(&samples[3]).unwrap(), Some(samples[2].clone()));

    // after the last call, slot2 holds the newest sample and slot1 the previous
    assert_eq!(repo.load(Slot::One).unwrap(), Some(samples[2].clone()));
    assert_eq!(repo.load(Slot::Two).unwrap(), Some(samples[3].clone()));
}

#[test]
fn test_advance_restart_reseeds_with_new_pid() {
    let dir = TempDir::new().unwrap();
    let repo = HistoryRepo::new(dir.path());
    let selector = BaselineSelector::new(&repo, INTERVAL);

    selector.advance(&current()).unwrap();

    let reborn = snapshot(PID + 1, 5.0, 0.0, 0.0);
    let baseline = selector.advance(&reborn).unwrap();
    assert!(baseline.is_none());
    assert_eq!(repo.load(Slot::One).unwrap(), Some(reborn.clone()));
    assert_eq!(repo.load(Slot::Two).unwrap(), Some(reborn));
}
