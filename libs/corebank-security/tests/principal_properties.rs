#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::BTreeSet;

use chrono::{Duration, TimeZone, Utc};
use corebank_security::{Account, InvalidAccountError, Role, build_principal};
use secrecy::ExposeSecret;

fn account_with(roles: &[Role]) -> Account {
    Account::builder()
        .username("grace")
        .password_hash("$argon2id$v=19$m=4096,t=1,p=1$c2FsdA$aGFzaA")
        .first_name("Grace")
        .last_name("Hopper")
        .roles(roles.iter().copied())
        .build()
}

fn every_role_subset() -> Vec<Vec<Role>> {
    (0..1_usize << Role::ALL.len())
        .map(|mask| {
            Role::ALL
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, role)| *role)
                .collect()
        })
        .collect()
}

#[test]
fn one_authority_per_role_without_duplicates_or_omissions() {
    for roles in every_role_subset() {
        let principal = build_principal(&account_with(&roles)).unwrap();

        let labels: BTreeSet<String> = principal
            .authorities()
            .iter()
            .map(ToString::to_string)
            .collect();
        let expected: BTreeSet<String> = roles.iter().map(|r| format!("ROLE_{r}")).collect();

        assert_eq!(principal.authorities().len(), roles.len());
        assert_eq!(labels, expected, "roles {}", roles.len());
    }
}

#[test]
#[allow(clippy::use_debug)] // Debug output covers every field, including private ones
fn input_account_is_left_untouched() {
    let account = account_with(&[Role::Admin, Role::Teller]);
    let before = format!("{account:?}");
    let hash_before = account.password_hash().expose_secret().to_owned();

    let _principal = build_principal(&account).unwrap();

    assert_eq!(format!("{account:?}"), before);
    assert_eq!(account.password_hash().expose_secret(), hash_before);
    assert_eq!(account.roles().len(), 2);
}

#[test]
fn equal_accounts_give_equal_principals() {
    let a = build_principal(&account_with(&[Role::Customer, Role::Admin])).unwrap();
    let b = build_principal(&account_with(&[Role::Admin, Role::Customer])).unwrap();

    assert_eq!(a.username(), b.username());
    assert_eq!(
        a.password_hash().expose_secret(),
        b.password_hash().expose_secret()
    );
    assert_eq!(a.authorities(), b.authorities());
}

#[test]
fn no_roles_means_empty_authorities() {
    let principal = build_principal(&account_with(&[])).unwrap();
    assert!(principal.authorities().is_empty());
}

#[test]
fn admin_and_customer_map_to_prefixed_labels() {
    let principal = build_principal(&account_with(&[Role::Admin, Role::Customer])).unwrap();
    assert_eq!(principal.authorities(), ["ROLE_ADMIN", "ROLE_CUSTOMER"]);
}

#[test]
fn missing_username_builds_nothing() {
    let account = Account::builder()
        .password_hash("hash")
        .role(Role::Customer)
        .build();

    let err = build_principal(&account).expect_err("account without username must be rejected");
    assert_eq!(err, InvalidAccountError::MissingUsername);
}

#[test]
fn status_predicates_reflect_account_state() {
    let now = Utc.with_ymd_and_hms(2026, 3, 15, 9, 30, 0).unwrap();

    let disabled = Account::builder()
        .username("dan")
        .password_hash("hash")
        .enabled(false)
        .build();
    let healthy = Account::builder()
        .username("hana")
        .password_hash("hash")
        .expires_at(now + Duration::days(365))
        .credentials_expire_at(now + Duration::days(90))
        .build();

    let disabled = build_principal(&disabled).unwrap();
    assert!(!disabled.is_enabled());

    let healthy = build_principal(&healthy).unwrap();
    assert!(healthy.is_enabled());
    assert!(!healthy.is_locked());
    assert!(!healthy.is_expired_at(now));
    assert!(!healthy.credentials_expired_at(now));
}
