use chrono::{DateTime, Duration, Utc};
use folio_core::{ActorId, AppError};

use super::{DocumentLifecycle, LifecycleCommand, LifecycleTransition};
use crate::{Actor, AssignmentRegistry, Document, DocumentKind, DocumentStatus, Role};

fn id(value: &str) -> ActorId {
    ActorId::new(value).unwrap_or_else(|_| unreachable!())
}

fn actor(value: &str, role: Role) -> Actor {
    Actor::new(id(value), role)
}

fn draft(author: &str, at: DateTime<Utc>) -> Document {
    Document::new_draft(DocumentKind::Content, "Quarterly update", "<p>v1</p>", id(author), at)
        .unwrap_or_else(|_| unreachable!())
}

fn registry_with(pairs: &[(&str, &str)]) -> AssignmentRegistry {
    let mut registry = AssignmentRegistry::new();
    for (editor, publisher) in pairs {
        let assigned = registry.assign(&id(editor), &id(publisher), Role::Admin);
        assert!(assigned.is_ok());
    }
    registry
}

fn submitted(registry: &AssignmentRegistry, at: DateTime<Utc>) -> Document {
    DocumentLifecycle::new(registry)
        .transition(
            &actor("ed1", Role::Edit),
            &draft("ed1", at),
            DocumentStatus::UnderReview,
            Some(&id("pub1")),
            at,
        )
        .unwrap_or_else(|_| unreachable!())
}

#[test]
fn submit_without_assignment_is_a_validation_error() {
    let now = Utc::now();
    let registry = AssignmentRegistry::new();
    let document = draft("ed1", now);

    let result = DocumentLifecycle::new(&registry).transition(
        &actor("ed1", Role::Edit),
        &document,
        DocumentStatus::UnderReview,
        Some(&id("pub1")),
        now,
    );

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(document.status(), DocumentStatus::Draft);
    assert!(document.assigned_publisher_id().is_none());
}

#[test]
fn submit_with_assignment_sets_publisher() {
    let now = Utc::now();
    let registry = registry_with(&[("ed1", "pub1")]);

    let document = submitted(&registry, now);

    assert_eq!(document.status(), DocumentStatus::UnderReview);
    assert_eq!(document.assigned_publisher_id(), Some(&id("pub1")));
    assert_eq!(document.revision(), 1);
}

#[test]
fn submit_by_other_editor_is_denied() {
    let now = Utc::now();
    let registry = registry_with(&[("ed1", "pub1"), ("ed2", "pub1")]);
    let document = draft("ed1", now);

    let result = DocumentLifecycle::new(&registry).transition(
        &actor("ed2", Role::Edit),
        &document,
        DocumentStatus::UnderReview,
        Some(&id("pub1")),
        now,
    );

    assert!(matches!(result, Err(AppError::Authorization(_))));
}

#[test]
fn submit_by_readonly_author_is_denied() {
    let now = Utc::now();
    let registry = registry_with(&[("ed1", "pub1")]);

    let result = DocumentLifecycle::new(&registry).transition(
        &actor("ed1", Role::Readonly),
        &draft("ed1", now),
        DocumentStatus::UnderReview,
        Some(&id("pub1")),
        now,
    );

    assert!(matches!(result, Err(AppError::Authorization(_))));
}

#[test]
fn admin_may_submit_to_unassigned_publisher() {
    let now = Utc::now();
    let registry = AssignmentRegistry::new();

    let result = DocumentLifecycle::new(&registry).transition(
        &actor("root", Role::Admin),
        &draft("ed1", now),
        DocumentStatus::UnderReview,
        Some(&id("pub9")),
        now,
    );

    let document = result.unwrap_or_else(|_| unreachable!());
    assert_eq!(document.assigned_publisher_id(), Some(&id("pub9")));
}

#[test]
fn submit_requires_a_publisher_choice() {
    let now = Utc::now();
    let registry = registry_with(&[("ed1", "pub1")]);

    let result = DocumentLifecycle::new(&registry).transition(
        &actor("ed1", Role::Edit),
        &draft("ed1", now),
        DocumentStatus::UnderReview,
        None,
        now,
    );

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[test]
fn assigned_publisher_can_publish() {
    let now = Utc::now();
    let later = now + Duration::minutes(5);
    let registry = registry_with(&[("ed1", "pub1")]);
    let document = submitted(&registry, now);

    let published = DocumentLifecycle::new(&registry)
        .transition(
            &actor("pub1", Role::Publish),
            &document,
            DocumentStatus::Published,
            None,
            later,
        )
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(published.status(), DocumentStatus::Published);
    assert_eq!(published.published_at(), Some(later));
    assert_eq!(published.updated_at(), later);
}

#[test]
fn unassigned_publisher_cannot_publish() {
    let now = Utc::now();
    let registry = registry_with(&[("ed1", "pub1")]);
    let document = submitted(&registry, now);

    let result = DocumentLifecycle::new(&registry).transition(
        &actor("pub2", Role::Publish),
        &document,
        DocumentStatus::Published,
        None,
        now,
    );

    assert!(matches!(result, Err(AppError::Authorization(_))));
    assert_eq!(document.status(), DocumentStatus::UnderReview);
    assert!(document.published_at().is_none());
}

#[test]
fn assigned_editor_role_cannot_publish() {
    let now = Utc::now();
    let registry = registry_with(&[("ed1", "pub1")]);
    let document = submitted(&registry, now);

    let result = DocumentLifecycle::new(&registry).transition(
        &actor("pub1", Role::Edit),
        &document,
        DocumentStatus::Published,
        None,
        now,
    );

    assert!(matches!(result, Err(AppError::Authorization(_))));
}

#[test]
fn admin_without_assignment_can_publish() {
    let now = Utc::now();
    let document = submitted(&registry_with(&[("ed1", "pub1")]), now);
    let empty = AssignmentRegistry::new();

    let published = DocumentLifecycle::new(&empty)
        .transition(
            &actor("root", Role::Admin),
            &document,
            DocumentStatus::Published,
            None,
            now,
        )
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(published.status(), DocumentStatus::Published);
    assert_eq!(published.published_at(), Some(now));
}

#[test]
fn admin_without_assignment_can_return_to_draft() {
    let now = Utc::now();
    let document = submitted(&registry_with(&[("ed1", "pub1")]), now);
    let empty = AssignmentRegistry::new();

    let returned = DocumentLifecycle::new(&empty)
        .transition(
            &actor("root", Role::Admin),
            &document,
            DocumentStatus::Draft,
            None,
            now,
        )
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(returned.status(), DocumentStatus::Draft);
    assert!(returned.assigned_publisher_id().is_none());
}

#[test]
fn admin_cannot_edit_someone_elses_draft() {
    let document = draft("ed1", Utc::now());

    let result = super::ensure_editable(&actor("root", Role::Admin), &document);

    assert!(matches!(result, Err(AppError::Authorization(_))));
}

#[test]
fn return_to_draft_clears_publisher() {
    let now = Utc::now();
    let registry = registry_with(&[("ed1", "pub1")]);
    let document = submitted(&registry, now);

    let returned = DocumentLifecycle::new(&registry)
        .transition(
            &actor("pub1", Role::Publish),
            &document,
            DocumentStatus::Draft,
            None,
            now,
        )
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(returned.status(), DocumentStatus::Draft);
    assert!(returned.assigned_publisher_id().is_none());
}

#[test]
fn unpublish_is_admin_only_and_preserves_published_at() {
    let now = Utc::now();
    let registry = registry_with(&[("ed1", "pub1")]);
    let lifecycle = DocumentLifecycle::new(&registry);
    let publisher = actor("pub1", Role::Publish);
    let first_published = lifecycle
        .transition(
            &publisher,
            &submitted(&registry, now),
            DocumentStatus::Published,
            None,
            now,
        )
        .unwrap_or_else(|_| unreachable!());

    let denied = lifecycle.transition(
        &publisher,
        &first_published,
        DocumentStatus::Draft,
        None,
        now,
    );
    assert!(matches!(denied, Err(AppError::Authorization(_))));

    let later = now + Duration::hours(1);
    let unpublished = lifecycle
        .transition(
            &actor("root", Role::Admin),
            &first_published,
            DocumentStatus::Draft,
            None,
            later,
        )
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(unpublished.status(), DocumentStatus::Draft);
    assert_eq!(unpublished.published_at(), Some(now));
    assert!(unpublished.assigned_publisher_id().is_none());

    let much_later = later + Duration::hours(1);
    let resubmitted = lifecycle
        .transition(
            &actor("ed1", Role::Edit),
            &unpublished,
            DocumentStatus::UnderReview,
            Some(&id("pub1")),
            much_later,
        )
        .unwrap_or_else(|_| unreachable!());
    let republished = lifecycle
        .transition(
            &publisher,
            &resubmitted,
            DocumentStatus::Published,
            None,
            much_later,
        )
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(republished.published_at(), Some(now));
    assert_eq!(republished.updated_at(), much_later);
}

#[test]
fn transitions_outside_the_table_are_illegal() {
    let now = Utc::now();
    let registry = registry_with(&[("ed1", "pub1")]);
    let lifecycle = DocumentLifecycle::new(&registry);
    let admin = actor("root", Role::Admin);

    let skip_review = lifecycle.transition(
        &admin,
        &draft("ed1", now),
        DocumentStatus::Published,
        None,
        now,
    );
    assert!(matches!(skip_review, Err(AppError::IllegalTransition(_))));

    let same_status = lifecycle.transition(
        &admin,
        &draft("ed1", now),
        DocumentStatus::Draft,
        None,
        now,
    );
    assert!(matches!(same_status, Err(AppError::IllegalTransition(_))));

    let resubmit = lifecycle.transition(
        &admin,
        &submitted(&registry, now),
        DocumentStatus::UnderReview,
        Some(&id("pub1")),
        now,
    );
    assert!(matches!(resubmit, Err(AppError::IllegalTransition(_))));
}

#[test]
fn author_can_edit_draft_in_place() {
    let now = Utc::now();
    let later = now + Duration::seconds(10);
    let registry = AssignmentRegistry::new();
    let document = draft("ed1", now);

    let edited = DocumentLifecycle::new(&registry)
        .apply(
            &actor("ed1", Role::Edit),
            &document,
            LifecycleCommand::EditBody {
                body: "<p>v2</p>".to_owned(),
            },
            later,
        )
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(edited.body(), "<p>v2</p>");
    assert_eq!(edited.updated_at(), later);
    assert_eq!(edited.status(), DocumentStatus::Draft);
    assert_eq!(document.body(), "<p>v1</p>");
}

#[test]
fn only_the_author_may_edit() {
    let now = Utc::now();
    let registry = AssignmentRegistry::new();
    let lifecycle = DocumentLifecycle::new(&registry);

    for intruder in [actor("ed2", Role::Edit), actor("root", Role::Admin)] {
        let result = lifecycle.edit_body(&intruder, &draft("ed1", now), "x".to_owned(), now);
        assert!(matches!(result, Err(AppError::Authorization(_))));
    }
}

#[test]
fn documents_under_review_cannot_be_edited() {
    let now = Utc::now();
    let registry = registry_with(&[("ed1", "pub1")]);

    let result = DocumentLifecycle::new(&registry).edit_body(
        &actor("ed1", Role::Edit),
        &submitted(&registry, now),
        "x".to_owned(),
        now,
    );

    assert!(matches!(result, Err(AppError::IllegalTransition(_))));
}

#[test]
fn transition_rows_round_trip_their_statuses() {
    for row in [
        LifecycleTransition::Submit,
        LifecycleTransition::ReturnToDraft,
        LifecycleTransition::Publish,
        LifecycleTransition::Unpublish,
    ] {
        let resolved = LifecycleTransition::resolve(row.from_status(), row.to_status());
        assert!(matches!(resolved, Ok(value) if value == row));
    }
}
