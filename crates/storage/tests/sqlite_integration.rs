use chrono::Duration;
use storage::repository::{SessionRepository, StorageError, SubmissionRepository};
use storage::sqlite::SqliteRepository;
use tutor_core::model::{ProblemSession, RawAnswer, SessionId, Submission, SubmissionId};
use tutor_core::time::fixed_now;

fn build_session() -> ProblemSession {
    ProblemSession::new(
        SessionId::generate(),
        "A bakery sold 45 cupcakes and 30 muffins. How many items did it sell?",
        75.0,
        fixed_now(),
    )
    .unwrap()
}

fn build_submission(session: &ProblemSession, answer: RawAnswer, offset_secs: i64) -> Submission {
    let is_correct = session.check_answer(&answer);
    Submission::new(
        SubmissionId::generate(),
        session.id(),
        answer,
        is_correct,
        "Great effort! Your answer is correct. Next, try a two-step problem.",
        fixed_now() + Duration::seconds(offset_secs),
    )
}

#[tokio::test]
async fn sqlite_session_roundtrip() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_session_rt?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let session = build_session();
    repo.insert_session(&session).await.unwrap();

    let fetched = repo.get_session(session.id()).await.expect("fetch");
    assert_eq!(fetched, session);
}

#[tokio::test]
async fn sqlite_missing_session_is_not_found() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_missing?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let err = repo.get_session(SessionId::generate()).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
}

#[tokio::test]
async fn sqlite_duplicate_session_is_a_conflict() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_dup?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let session = build_session();
    repo.insert_session(&session).await.unwrap();
    let err = repo.insert_session(&session).await.unwrap_err();
    assert!(matches!(err, StorageError::Conflict));
}

#[tokio::test]
async fn sqlite_submissions_roundtrip_raw_answer_shape() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_subs?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let session = build_session();
    repo.insert_session(&session).await.unwrap();

    let as_text = build_submission(&session, RawAnswer::from("75"), 0);
    let as_number = build_submission(&session, RawAnswer::Number(75.0), 1);
    let wrong = build_submission(&session, RawAnswer::from("abc"), 2);
    repo.insert_submission(&as_text).await.unwrap();
    repo.insert_submission(&as_number).await.unwrap();
    repo.insert_submission(&wrong).await.unwrap();

    let listed = repo.list_submissions(session.id()).await.expect("list");
    assert_eq!(listed.len(), 3);
    // Newest first.
    assert_eq!(listed[0], wrong);
    assert_eq!(listed[1], as_number);
    assert_eq!(listed[2], as_text);

    assert_eq!(listed[2].user_answer(), &RawAnswer::from("75"));
    assert_eq!(listed[1].user_answer(), &RawAnswer::Number(75.0));
    assert!(listed[1].is_correct());
    assert!(!listed[0].is_correct());
}

#[tokio::test]
async fn sqlite_unknown_session_lists_no_submissions() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_empty_list?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let listed = repo
        .list_submissions(SessionId::generate())
        .await
        .expect("list");
    assert!(listed.is_empty());
}

#[tokio::test]
async fn sqlite_migrations_are_idempotent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_migrate_twice?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first migrate");
    repo.migrate().await.expect("second migrate");

    let session = build_session();
    repo.insert_session(&session).await.unwrap();
    assert!(repo.get_session(session.id()).await.is_ok());
}
