//! Tests for the result repository and leaderboard ordering.

mod common;

use common::setup_test_db;
use twenty48::{BoardSize, NewResultRecord, PlayerName, ResultRepository, ResultStore};

fn result(created_at: i64, size: usize, score: u32, moves: u32, name: &str) -> NewResultRecord {
    NewResultRecord::new(
        created_at,
        BoardSize::new(size).expect("Invalid size"),
        score,
        moves,
        &PlayerName::new(name).expect("Invalid name"),
    )
}

fn size(n: usize) -> BoardSize {
    BoardSize::new(n).expect("Invalid size")
}

#[test]
fn test_record_result() {
    let (_db, repo) = setup_test_db();
    let stored = repo
        .record(&result(1_700_000_000, 4, 256, 120, "ann"))
        .expect("Record failed");

    assert!(*stored.id() > 0);
    assert_eq!(*stored.created_at(), 1_700_000_000);
    assert_eq!(*stored.size(), 4);
    assert_eq!(*stored.score(), 256);
    assert_eq!(*stored.moves(), 120);
    assert_eq!(stored.player_name(), "ann");
}

#[test]
fn test_top_three_empty() {
    let (_db, repo) = setup_test_db();
    let top = repo.top_three(size(4)).expect("Query failed");
    assert!(top.is_empty());
}

#[test]
fn test_top_three_orders_by_score_then_moves() {
    let (_db, repo) = setup_test_db();
    repo.record(&result(100, 4, 64, 10, "a")).expect("Record failed");
    repo.record(&result(101, 4, 128, 8, "b")).expect("Record failed");
    repo.record(&result(102, 4, 64, 12, "c")).expect("Record failed");

    let top = repo.top_three(size(4)).expect("Query failed");
    let ranking: Vec<(i64, i64)> = top.iter().map(|r| (*r.score(), *r.moves())).collect();
    assert_eq!(ranking, vec![(128, 8), (64, 10), (64, 12)]);
}

#[test]
fn test_earlier_result_wins_full_tie() {
    let (_db, repo) = setup_test_db();
    repo.record(&result(300, 3, 32, 20, "late")).expect("Record failed");
    repo.record(&result(200, 3, 32, 20, "early")).expect("Record failed");

    let top = repo.top_three(size(3)).expect("Query failed");
    assert_eq!(top[0].player_name(), "early");
    assert_eq!(top[1].player_name(), "late");
}

#[test]
fn test_top_three_limits_and_filters_by_size() {
    let (_db, repo) = setup_test_db();
    for (i, score) in [16, 32, 64, 128, 256].iter().enumerate() {
        repo.record(&result(i as i64, 5, *score, 10, "p"))
            .expect("Record failed");
    }
    repo.record(&result(99, 4, 2048, 1, "big")).expect("Record failed");

    let top = repo.top_three(size(5)).expect("Query failed");
    let scores: Vec<i64> = top.iter().map(|r| *r.score()).collect();
    assert_eq!(scores, vec![256, 128, 64]);
    assert!(top.iter().all(|r| *r.size() == 5));
}

#[test]
fn test_record_and_rank_includes_new_result() {
    let (_db, repo) = setup_test_db();
    repo.record(&result(1, 4, 64, 10, "old")).expect("Record failed");

    let (stored, top) = repo
        .record_and_rank(&result(2, 4, 512, 90, "new"), size(4))
        .expect("Record failed");

    assert_eq!(top.len(), 2);
    assert_eq!(top[0].id(), stored.id());
    assert_eq!(top[0].player_name(), "new");
}

#[test]
fn test_store_trait_uses_repository() {
    let (_db, repo) = setup_test_db();
    let store: &dyn ResultStore = &repo;
    store
        .record(&result(1, 6, 8, 3, "dyn"))
        .expect("Record failed");
    let top = store.top_three(size(6)).expect("Query failed");
    assert_eq!(top.len(), 1);
}

#[test]
fn test_reopen_keeps_results() {
    let (db, repo) = setup_test_db();
    repo.record(&result(1, 4, 64, 10, "ann")).expect("Record failed");

    let path = db.path().to_str().expect("Invalid path").to_string();
    let reopened = ResultRepository::open(path).expect("Reopen failed");
    let top = reopened.top_three(size(4)).expect("Query failed");
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].player_name(), "ann");
}

#[test]
fn test_open_fails_for_bad_path() {
    let result = ResultRepository::open("/nonexistent/dir/results.db".to_string());
    assert!(result.is_err());
}
