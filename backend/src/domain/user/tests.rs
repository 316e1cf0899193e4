//! Tests for the domain user model.

use super::*;
use rstest::{fixture, rstest};

#[rstest]
#[case("a")]
#[case("Ada")]
#[case("ada1815")]
#[case("Z9z9")]
fn username_accepts_letter_then_alphanumerics(#[case] raw: &str) {
    let username = Username::new(raw).expect("valid username");
    assert_eq!(username.as_str(), raw);
}

#[rstest]
#[case("", UserValidationError::EmptyUsername)]
#[case("1ada", UserValidationError::InvalidUsername)]
#[case("ada_lovelace", UserValidationError::InvalidUsername)]
#[case("ada lovelace", UserValidationError::InvalidUsername)]
#[case("ada-1", UserValidationError::InvalidUsername)]
#[case("ädä", UserValidationError::InvalidUsername)]
fn username_rejects_bad_shapes(#[case] raw: &str, #[case] expected: UserValidationError) {
    let err = Username::new(raw).expect_err("invalid username must fail");
    assert_eq!(err, expected);
}

#[rstest]
fn username_deserialises_through_validation() {
    let parsed: Result<Username, _> = serde_json::from_str("\"9lives\"");
    assert!(parsed.is_err());

    let parsed: Username = serde_json::from_str("\"ada\"").expect("valid username");
    assert_eq!(parsed.as_str(), "ada");
}

#[rstest]
#[case("ada@example.com")]
#[case("ada.lovelace+blog@mail.example.org")]
#[case("a_b%c-d@sub.domain.io")]
fn email_accepts_common_shapes(#[case] raw: &str) {
    assert!(EmailAddress::new(raw).is_ok());
}

#[rstest]
#[case("", UserValidationError::EmptyEmail)]
#[case("ada", UserValidationError::InvalidEmail)]
#[case("ada@", UserValidationError::InvalidEmail)]
#[case("ada@example", UserValidationError::InvalidEmail)]
#[case("ada@example.c", UserValidationError::InvalidEmail)]
#[case("ada lovelace@example.com", UserValidationError::InvalidEmail)]
fn email_rejects_malformed_addresses(#[case] raw: &str, #[case] expected: UserValidationError) {
    let err = EmailAddress::new(raw).expect_err("invalid email must fail");
    assert_eq!(err, expected);
}

#[rstest]
#[case("")]
#[case("   ")]
fn full_name_rejects_blank(#[case] raw: &str) {
    assert_eq!(
        FullName::new(raw).expect_err("blank name"),
        UserValidationError::EmptyFullName
    );
}

#[rstest]
#[case("images/ada.png")]
#[case("/")]
#[case("/images/../etc/passwd")]
#[case("/images/./ada.png")]
#[case("/images//ada.png")]
#[case(r"/images/..\ada.png")]
fn profile_picture_path_must_be_public_absolute(#[case] raw: &str) {
    assert_eq!(
        ProfilePicturePath::new(raw).expect_err("invalid path"),
        UserValidationError::InvalidProfilePicturePath
    );
}

#[rstest]
#[case("/images/ada.png")]
#[case("/images/holiday..final.png")]
#[case("/images/.hidden.png")]
fn profile_picture_path_allows_dots_inside_names(#[case] raw: &str) {
    let path = ProfilePicturePath::new(raw).expect("valid path");
    assert_eq!(path.as_str(), raw);
}

#[rstest]
fn profile_picture_path_fits_storage_column() {
    let prefix = "/images/";
    let fits = format!("{prefix}{}", "p".repeat(ProfilePicturePath::MAX_LEN - prefix.len()));
    assert!(ProfilePicturePath::new(fits.as_str()).is_ok());
    assert_eq!(
        ProfilePicturePath::new(format!("{fits}p")).expect_err("too long"),
        UserValidationError::InvalidProfilePicturePath
    );
}

#[rstest]
fn password_hash_debug_is_redacted() {
    let hash = PasswordHash::new("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA")
        .expect("non-empty hash");
    assert_eq!(format!("{hash:?}"), "PasswordHash(<redacted>)");
}

#[fixture]
fn parts() -> UserParts {
    UserParts {
        id: UserId::random(),
        full_name: FullName::new("Ada Lovelace").expect("full name"),
        email: EmailAddress::new("ada@example.com").expect("email"),
        username: Username::new("ada").expect("username"),
        password_hash: PasswordHash::new("$argon2id$hash").expect("hash"),
        role_id: RoleId::new(2),
        profile_picture: None,
    }
}

#[rstest]
fn user_exposes_its_parts(parts: UserParts) {
    let id = parts.id;
    let user = User::new(parts);

    assert_eq!(user.id(), &id);
    assert_eq!(user.full_name().as_str(), "Ada Lovelace");
    assert_eq!(user.email().as_str(), "ada@example.com");
    assert_eq!(user.username().as_str(), "ada");
    assert_eq!(user.role_id(), RoleId::new(2));
    assert!(user.profile_picture().is_none());
}

#[rstest]
fn user_keeps_profile_picture(mut parts: UserParts) {
    parts.profile_picture = Some(ProfilePicturePath::new("/images/ada.png").expect("path"));
    let user = User::new(parts);
    assert_eq!(
        user.profile_picture().map(ProfilePicturePath::as_str),
        Some("/images/ada.png")
    );
}
