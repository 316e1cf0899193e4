//! Tests for the registration orchestrator.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{
    FixtureRoleRepository, MockPasswordHasher, MockProfileImageStore, MockRoleRepository,
    MockUserRepository, UserPersistenceError,
};
use crate::domain::registration::{
    CONFIRM_PASSWORD_REQUIRED, EMAIL_INVALID, EMAIL_REQUIRED, FULLNAME_REQUIRED, PASSWORD_REQUIRED,
    USERNAME_REQUIRED,
};
use crate::domain::{ProfileImageUpload, ProfilePicturePath, Role, RoleId};
use rstest::rstest;
use zeroize::Zeroizing;

const STUB_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$c3R1Yg";

fn valid_form() -> RegistrationForm {
    RegistrationForm {
        full_name: "Ada Lovelace".to_owned(),
        email: "ada@example.com".to_owned(),
        username: "ada".to_owned(),
        password: Zeroizing::new("Engine#1843".to_owned()),
        confirm_password: Zeroizing::new("Engine#1843".to_owned()),
        profile_picture: None,
    }
}

fn existing_user(username: &str) -> User {
    User::new(UserParts {
        id: UserId::random(),
        full_name: FullName::new("Existing Person").expect("full name"),
        email: EmailAddress::new("existing@example.com").expect("email"),
        username: Username::new(username).expect("username"),
        password_hash: PasswordHash::new(STUB_HASH).expect("hash"),
        role_id: RoleId::new(2),
        profile_picture: None,
    })
}

fn stub_hasher() -> MockPasswordHasher {
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .returning(|_, _| Ok(PasswordHash::new(STUB_HASH).expect("stub hash")));
    hasher
}

fn make_service(
    users: MockUserRepository,
    hasher: MockPasswordHasher,
    images: MockProfileImageStore,
) -> RegistrationService {
    RegistrationService::new(
        Arc::new(users),
        Arc::new(FixtureRoleRepository),
        Arc::new(hasher),
        Arc::new(images),
    )
}

fn rejected(outcome: RegistrationOutcome) -> RegistrationErrors {
    match outcome {
        RegistrationOutcome::Rejected(errors) => errors,
        RegistrationOutcome::Registered { username, .. } => {
            panic!("expected rejection, registered {username}")
        }
    }
}

#[tokio::test]
async fn blank_form_never_touches_storage() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_username().never();
    users.expect_create().never();
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_hash().never();

    let service = make_service(users, hasher, MockProfileImageStore::new());
    let errors = rejected(service.register(RegistrationForm::default()).await);

    assert_eq!(errors.get(RegistrationField::FullName), Some(FULLNAME_REQUIRED));
    assert_eq!(errors.get(RegistrationField::Username), Some(USERNAME_REQUIRED));
    assert_eq!(errors.get(RegistrationField::Email), Some(EMAIL_REQUIRED));
    assert_eq!(errors.get(RegistrationField::Password), Some(PASSWORD_REQUIRED));
    assert_eq!(
        errors.get(RegistrationField::ConfirmPassword),
        Some(CONFIRM_PASSWORD_REQUIRED)
    );
}

#[tokio::test]
async fn field_errors_skip_create_but_still_check_uniqueness() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .withf(|username| username == "ada")
        .times(1)
        .returning(|_| Ok(None));
    users.expect_create().never();

    let mut form = valid_form();
    form.email = "not-an-email".to_owned();

    let service = make_service(users, MockPasswordHasher::new(), MockProfileImageStore::new());
    let errors = rejected(service.register(form).await);

    assert_eq!(errors.get(RegistrationField::Email), Some(EMAIL_INVALID));
    assert_eq!(errors.entries().count(), 1);
}

#[tokio::test]
async fn taken_username_is_reported_without_insert() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .times(1)
        .returning(|username| Ok(Some(existing_user(username))));
    users.expect_create().never();

    let service = make_service(users, MockPasswordHasher::new(), MockProfileImageStore::new());
    let errors = rejected(service.register(valid_form()).await);

    assert_eq!(errors.get(RegistrationField::Username), Some(USERNAME_TAKEN));
}

#[tokio::test]
async fn failed_lookup_collapses_to_invalid_input() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .returning(|_| Err(UserPersistenceError::connection("refused")));
    users.expect_create().never();

    let mut form = valid_form();
    form.email = String::new();

    let service = make_service(users, MockPasswordHasher::new(), MockProfileImageStore::new());
    let errors = rejected(service.register(form).await);

    assert_eq!(errors, RegistrationErrors::general(INVALID_INPUT));
}

#[tokio::test]
async fn valid_form_creates_user_with_user_role() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_username().returning(|_| Ok(None));
    users
        .expect_create()
        .withf(|user| {
            user.username().as_str() == "ada"
                && user.full_name().as_str() == "Ada Lovelace"
                && user.email().as_str() == "ada@example.com"
                && user.password_hash().as_str() == STUB_HASH
                && user.role_id() == RoleId::new(2)
                && user.profile_picture().is_none()
        })
        .times(1)
        .returning(|_| Ok(()));

    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .withf(|username, password| username.as_str() == "ada" && password == "Engine#1843")
        .times(1)
        .returning(|_, _| Ok(PasswordHash::new(STUB_HASH).expect("stub hash")));

    let service = make_service(users, hasher, MockProfileImageStore::new());
    let outcome = service.register(valid_form()).await;

    match outcome {
        RegistrationOutcome::Registered { username, .. } => assert_eq!(username.as_str(), "ada"),
        RegistrationOutcome::Rejected(errors) => panic!("unexpected rejection: {errors:?}"),
    }
}

#[rstest]
#[case(UserPersistenceError::connection("pool exhausted"), RegistrationField::General, SERVICE_UNAVAILABLE)]
#[case(UserPersistenceError::query("check violated"), RegistrationField::General, REGISTRATION_FAILED)]
#[case(UserPersistenceError::conflict("ada"), RegistrationField::Username, USERNAME_TAKEN)]
#[tokio::test]
async fn create_failures_map_to_form_messages(
    #[case] failure: UserPersistenceError,
    #[case] field: RegistrationField,
    #[case] message: &str,
) {
    let mut users = MockUserRepository::new();
    users.expect_find_by_username().returning(|_| Ok(None));
    users
        .expect_create()
        .times(1)
        .return_once(move |_| Err(failure));

    let service = make_service(users, stub_hasher(), MockProfileImageStore::new());
    let errors = rejected(service.register(valid_form()).await);

    assert_eq!(errors.get(field), Some(message));
    assert_eq!(errors.entries().count(), 1);
}

#[tokio::test]
async fn missing_user_role_is_an_unexpected_error() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_username().returning(|_| Ok(None));
    users.expect_create().never();

    let mut roles = MockRoleRepository::new();
    roles
        .expect_find_by_name()
        .withf(|name| name == USER_ROLE)
        .returning(|_| Ok(None));

    let service = RegistrationService::new(
        Arc::new(users),
        Arc::new(roles),
        Arc::new(MockPasswordHasher::new()),
        Arc::new(MockProfileImageStore::new()),
    );
    let errors = rejected(service.register(valid_form()).await);

    assert_eq!(errors, RegistrationErrors::general(UNEXPECTED_ERROR));
}

#[tokio::test]
async fn role_lookup_failure_is_an_unexpected_error() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_username().returning(|_| Ok(None));
    users.expect_create().never();

    let mut roles = MockRoleRepository::new();
    roles
        .expect_find_by_name()
        .returning(|_| Err(RolePersistenceError::connection("refused")));

    let service = RegistrationService::new(
        Arc::new(users),
        Arc::new(roles),
        Arc::new(stub_hasher()),
        Arc::new(MockProfileImageStore::new()),
    );
    let errors = rejected(service.register(valid_form()).await);

    assert_eq!(errors, RegistrationErrors::general(UNEXPECTED_ERROR));
}

#[tokio::test]
async fn hashing_failure_is_an_unexpected_error() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_username().returning(|_| Ok(None));
    users.expect_create().never();

    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .returning(|_, _| Err(PasswordHashError::hash("out of memory")));

    let service = make_service(users, hasher, MockProfileImageStore::new());
    let errors = rejected(service.register(valid_form()).await);

    assert_eq!(errors, RegistrationErrors::general(UNEXPECTED_ERROR));
}

#[tokio::test]
async fn uploaded_picture_path_is_stored_on_user() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_username().returning(|_| Ok(None));
    users
        .expect_create()
        .withf(|user| {
            user.profile_picture().map(ProfilePicturePath::as_str) == Some("/images/ada.png")
        })
        .times(1)
        .returning(|_| Ok(()));

    let mut images = MockProfileImageStore::new();
    images
        .expect_store()
        .withf(|upload| upload.file_name() == "ada.png")
        .times(1)
        .returning(|_| Ok(ProfilePicturePath::new("/images/ada.png").expect("path")));

    let mut form = valid_form();
    form.profile_picture = Some(ProfileImageUpload::new(
        "ada.png",
        Some("image/png".to_owned()),
        vec![0x89, 0x50, 0x4e, 0x47],
    ));

    let service = make_service(users, stub_hasher(), images);
    let outcome = service.register(form).await;

    assert!(matches!(outcome, RegistrationOutcome::Registered { .. }));
}

#[tokio::test]
async fn empty_file_part_is_ignored() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_username().returning(|_| Ok(None));
    users
        .expect_create()
        .withf(|user| user.profile_picture().is_none())
        .returning(|_| Ok(()));

    let mut images = MockProfileImageStore::new();
    images.expect_store().never();

    let mut form = valid_form();
    form.profile_picture = Some(ProfileImageUpload::new("", None, Vec::new()));

    let service = make_service(users, stub_hasher(), images);
    let outcome = service.register(form).await;

    assert!(matches!(outcome, RegistrationOutcome::Registered { .. }));
}

#[tokio::test]
async fn image_failure_aborts_before_insert() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_username().returning(|_| Ok(None));
    users.expect_create().never();

    let mut images = MockProfileImageStore::new();
    images
        .expect_store()
        .returning(|_| Err(ImageStoreError::io("disk full")));

    let mut form = valid_form();
    form.profile_picture = Some(ProfileImageUpload::new("ada.png", None, vec![1, 2, 3]));

    let service = make_service(users, stub_hasher(), images);
    let errors = rejected(service.register(form).await);

    assert_eq!(errors, RegistrationErrors::general(UNEXPECTED_ERROR));
}

#[tokio::test]
async fn role_record_id_flows_into_user() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_username().returning(|_| Ok(None));
    users
        .expect_create()
        .withf(|user| user.role_id() == RoleId::new(42))
        .times(1)
        .returning(|_| Ok(()));

    let mut roles = MockRoleRepository::new();
    roles
        .expect_find_by_name()
        .returning(|name| Ok(Some(Role::new(RoleId::new(42), name))));

    let service = RegistrationService::new(
        Arc::new(users),
        Arc::new(roles),
        Arc::new(stub_hasher()),
        Arc::new(MockProfileImageStore::new()),
    );

    assert!(matches!(
        service.register(valid_form()).await,
        RegistrationOutcome::Registered { .. }
    ));
}
