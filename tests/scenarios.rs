use profile_access::errors::{
    AuthorizationError, SessionError, ValidationError,
};
use profile_access::{
    Access, Dispatcher, MemoryAudit, ProfileError, ProfileState,
};

fn dispatcher() -> Dispatcher<MemoryAudit> {
    Dispatcher::new(ProfileState::new(), MemoryAudit::new())
}

fn ok(d: &mut Dispatcher<MemoryAudit>, line: &str) {
    let outcome = d.execute_line(line).expect("line should be processed");
    assert!(outcome.is_success(), "{} -> {}", line, outcome.line);
}

fn err(d: &mut Dispatcher<MemoryAudit>, line: &str) -> ProfileError {
    let outcome = d.execute_line(line).expect("line should be processed");
    outcome
        .error
        .unwrap_or_else(|| panic!("{} should have failed", line))
}

#[test]
fn owner_views_before_anyone_else() {
    let mut d = dispatcher();
    ok(&mut d, "friendadd alice");
    ok(&mut d, "friendadd bob");

    assert_eq!(
        err(&mut d, "viewby bob").to_string(),
        SessionError::OwnerMustViewFirst {
            owner: "alice".to_owned()
        }
        .to_string()
    );
    assert!(!d.state().session.owner_has_viewed());

    ok(&mut d, "viewby alice");
    assert!(d.state().session.owner_has_viewed());
    ok(&mut d, "logout");
    ok(&mut d, "viewby bob");
    assert_eq!(d.state().session.current_viewer(), Some("bob"));

    assert!(matches!(
        err(&mut d, "viewby alice"),
        ProfileError::Session(SessionError::ConcurrentViewer { active }) if active == "bob"
    ));
}

#[test]
fn list_scope_opens_a_picture_to_members_only() {
    let mut d = dispatcher();
    for line in [
        "friendadd alice",
        "friendadd bob",
        "friendadd carol",
        "viewby alice",
        "listadd family",
        "friendlist bob family",
        "friendlist carol family",
        "logout",
        "viewby bob",
        "postpicture pic1",
        "writecomments pic1 first!",
        "logout",
        "viewby alice",
    ] {
        ok(&mut d, line);
    }

    // alice owns the profile but not the picture
    assert!(matches!(
        err(&mut d, "readcomments pic1"),
        ProfileError::Authorization(AuthorizationError::AccessDenied {
            access: Access::Read,
            ..
        })
    ));

    ok(&mut d, "logout");
    ok(&mut d, "viewby bob");
    ok(&mut d, "chlst pic1 family");
    ok(&mut d, "chmod pic1 rw r- --");
    ok(&mut d, "logout");

    ok(&mut d, "viewby carol");
    let outcome = d.execute_line("readcomments pic1").unwrap();
    assert_eq!(outcome.output.as_deref(), Some("first!"));
    assert!(matches!(
        err(&mut d, "writecomments pic1 me too"),
        ProfileError::Authorization(AuthorizationError::AccessDenied {
            access: Access::Write,
            ..
        })
    ));
    ok(&mut d, "logout");

    ok(&mut d, "viewby alice");
    err(&mut d, "readcomments pic1");
}

#[test]
fn denied_comment_is_not_recorded() {
    let mut d = dispatcher();
    for line in [
        "friendadd alice",
        "friendadd mallory",
        "viewby alice",
        "postpicture pic1",
        "logout",
        "viewby mallory",
    ] {
        ok(&mut d, line);
    }

    err(&mut d, "writecomments pic1 hello world");

    assert!(d.state().pictures.get("pic1").unwrap().comments.is_empty());
    let last = d.audit().lines().last().unwrap();
    assert!(last.starts_with("Error:"));
    assert!(!last.contains("hello world"));
}

#[test]
fn chmod_replay_changes_nothing() {
    let mut d = dispatcher();
    for line in [
        "friendadd alice",
        "viewby alice",
        "postpicture pic1",
        "chmod pic1 rw r- r-",
    ] {
        ok(&mut d, line);
    }
    let before = d.state().clone();
    let audit_len = d.audit().lines().len();

    ok(&mut d, "chmod pic1 rw r- r-");

    assert_eq!(d.state(), &before);
    assert_eq!(d.audit().lines().len(), audit_len + 1);
    assert_eq!(
        d.audit().lines()[audit_len],
        d.audit().lines()[audit_len - 1]
    );
}

#[test]
fn malformed_lines_are_reported() {
    let mut d = dispatcher();
    let summary = d.run_lines([
        "friendadd",
        "friendadd alice bob",
        "viewby alice",
        "dance alice",
        "writecomments pic1",
        "chmod pic1 rw",
    ]);
    assert_eq!(summary.processed, 6);
    assert_eq!(summary.failed, 6);
    assert!(!summary.ended);
    assert!(d.state().friends.is_empty());
    assert!(d
        .audit()
        .lines()
        .iter()
        .all(|line| line.starts_with("Error:")));

    assert!(matches!(
        err(&mut d, "dance"),
        ProfileError::Validation(ValidationError::InvalidCommand(_))
    ));
}

#[test]
fn nothing_runs_after_end() {
    let mut d = dispatcher();
    let summary = d.run_lines([
        "friendadd alice",
        "viewby alice",
        "end",
        "postpicture late",
    ]);
    assert!(summary.ended);
    assert_eq!(summary.processed, 3);
    assert!(d.state().pictures.is_empty());
    assert!(d.execute_line("logout").is_none());
    assert_eq!(d.state().session.current_viewer(), Some("alice"));
}
