//! Domain-focused tests for usernames, emails, passwords and tokens.

use crate::identity::domain::{
    AccessToken, Email, IdentityDomainError, MAX_PASSWORD_BYTES, MIN_PASSWORD_CHARS, PasswordHash,
    StoredToken, UserId, Username,
};
use chrono::TimeDelta;
use mockable::{Clock, DefaultClock};
use rstest::rstest;

#[rstest]
#[case("olivia")]
#[case("  marcus ")]
#[case("dev_ops-42")]
fn username_accepts_compact_names(#[case] raw: &str) {
    assert!(Username::new(raw).is_ok());
}

#[rstest]
#[case("ab")]
#[case("two words")]
#[case("   ")]
fn username_rejects_short_or_spaced_names(#[case] raw: &str) {
    assert!(matches!(
        Username::new(raw),
        Err(IdentityDomainError::InvalidUsername(_))
    ));
}

#[rstest]
#[case("olivia@example.com", true)]
#[case("olivia@localhost", false)]
#[case("@example.com", false)]
#[case("olivia.example.com", false)]
#[case("a@b@example.com", false)]
fn email_requires_local_part_and_dotted_domain(#[case] raw: &str, #[case] valid: bool) {
    assert_eq!(Email::new(raw).is_ok(), valid);
}

#[rstest]
fn password_hash_verifies_only_the_original_password() -> eyre::Result<()> {
    let hash = PasswordHash::derive("correct-horse")?;

    eyre::ensure!(hash.verify("correct-horse"), "original password verifies");
    eyre::ensure!(!hash.verify("correct-horsE"), "other password fails");
    eyre::ensure!(hash.as_str().starts_with("$2b$"), "encoded as bcrypt");
    Ok(())
}

#[rstest]
fn password_hash_is_salted() -> eyre::Result<()> {
    let first = PasswordHash::derive("correct-horse")?;
    let second = PasswordHash::derive("correct-horse")?;
    eyre::ensure!(first != second, "same password hashes differently");
    Ok(())
}

#[rstest]
fn password_hash_rejects_short_passwords() {
    assert_eq!(
        PasswordHash::derive("short"),
        Err(IdentityDomainError::PasswordTooShort {
            min: MIN_PASSWORD_CHARS
        })
    );
}

#[rstest]
fn password_hash_round_trips_through_storage() -> eyre::Result<()> {
    let hash = PasswordHash::derive("correct-horse")?;
    let restored = PasswordHash::from_encoded(hash.as_str())?;
    eyre::ensure!(restored.verify("correct-horse"), "restored hash verifies");
    eyre::ensure!(
        PasswordHash::from_encoded("plaintext").is_err(),
        "malformed digests are rejected"
    );
    Ok(())
}

#[rstest]
fn bcrypt_digests_from_other_encoders_verify() -> eyre::Result<()> {
    let encoded = bcrypt::hash_with_salt("correct-horse", 4, [7_u8; 16])?
        .format_for_version(bcrypt::Version::TwoA);
    let hash = PasswordHash::from_encoded(encoded.as_str())?;

    eyre::ensure!(encoded.starts_with("$2a$04$"), "stored as {encoded}");
    eyre::ensure!(hash.verify("correct-horse"), "known digest verifies");
    eyre::ensure!(!hash.verify("wrong-horse"), "other password fails");
    Ok(())
}

#[rstest]
fn password_hash_rejects_passwords_bcrypt_would_truncate() {
    assert_eq!(
        PasswordHash::derive(&"x".repeat(MAX_PASSWORD_BYTES + 1)),
        Err(IdentityDomainError::PasswordTooLong {
            max: MAX_PASSWORD_BYTES
        })
    );
}

#[rstest]
fn unknown_account_digest_runs_a_full_verification() -> eyre::Result<()> {
    let placeholder = PasswordHash::unknown_account();

    eyre::ensure!(
        PasswordHash::from_encoded(placeholder.as_str()).is_ok(),
        "placeholder is a well-formed digest"
    );
    eyre::ensure!(
        !bcrypt::verify("correct-horse", placeholder.as_str())?,
        "placeholder never matches"
    );
    PasswordHash::verify_absent("correct-horse");
    Ok(())
}

#[rstest]
fn secrets_are_redacted_in_debug_output() -> eyre::Result<()> {
    let token = AccessToken::generate();
    let hash = PasswordHash::derive("correct-horse")?;
    eyre::ensure!(!format!("{token:?}").contains(token.expose()), "token redacted");
    eyre::ensure!(!format!("{hash:?}").contains("$2b$"), "hash redacted");
    Ok(())
}

#[rstest]
fn token_digest_is_stable_and_distinct_from_secret() {
    let token = AccessToken::generate();
    let presented = AccessToken::from_presented(token.expose());

    assert_eq!(token.digest(), presented.digest());
    assert_ne!(token.digest().as_str(), token.expose());
    assert_eq!(token.digest().as_str().len(), 64);
}

#[rstest]
fn stored_token_expires_at_ttl() {
    let clock = DefaultClock;
    let record = StoredToken::issue(
        &AccessToken::generate(),
        UserId::new(),
        TimeDelta::hours(24),
        &clock,
    );

    assert!(!record.is_expired_at(clock.utc()));
    assert!(record.is_expired_at(record.expires_at));
    assert_eq!(record.expires_at - record.issued_at, TimeDelta::hours(24));
}
