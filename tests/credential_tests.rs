use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use userbase::credential;
use userbase::Error;

#[test]
fn derived_credential_verifies() {
    let cred = credential::derive("secret123").unwrap();
    assert!(credential::verify("secret123", &cred.hash, &cred.salt));
}

#[test]
fn wrong_password_fails_verification() {
    let cred = credential::derive("secret123").unwrap();
    assert!(!credential::verify("secret124", &cred.hash, &cred.salt));
    assert!(!credential::verify("", &cred.hash, &cred.salt));
}

#[test]
fn each_derivation_gets_a_fresh_salt() {
    let a = credential::derive("same-password").unwrap();
    let b = credential::derive("same-password").unwrap();
    assert_ne!(a.salt, b.salt);
    assert_ne!(a.hash, b.hash);
}

#[test]
fn empty_password_is_rejected() {
    assert!(matches!(credential::derive(""), Err(Error::Validation(_))));
    assert!(matches!(
        credential::derive("   \t"),
        Err(Error::Validation(_))
    ));
}

#[test]
fn hash_and_salt_are_base64() {
    let cred = credential::derive("secret123").unwrap();
    let hash = BASE64.decode(&cred.hash).expect("hash not base64");
    let salt = BASE64.decode(&cred.salt).expect("salt not base64");
    assert_eq!(hash.len(), 32);
    assert_eq!(salt.len(), credential::SALT_LEN);
}

#[test]
fn undecodable_stored_fields_verify_false() {
    let cred = credential::derive("secret123").unwrap();
    assert!(!credential::verify("secret123", "!!not base64!!", &cred.salt));
    assert!(!credential::verify("secret123", &cred.hash, "!!not base64!!"));
}
