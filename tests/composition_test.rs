//! Integration tests for delegating to nested validators.

use std::collections::HashSet;

use pathwise::{Configuration, ContextualValidator, Path, Validatable, Validator};

#[derive(Debug)]
struct Address {
    street: String,
    zip: String,
}

#[derive(Debug)]
struct Customer {
    name: String,
    shipping: Address,
    billing: Option<Address>,
}

fn address_validator() -> Validator<Address> {
    Validator::new(|a: Validatable<&Address>| {
        a.field("street", |a| &a.street).is_not_blank();
        a.field("zip", |a| &a.zip).has_length_between(5..=5);
    })
}

fn address(street: &str, zip: &str) -> Address {
    Address {
        street: street.into(),
        zip: zip.into(),
    }
}

#[test]
fn test_nested_paths_are_prefixed_with_current_path() {
    let addresses = address_validator();
    let customers = Validator::new(move |c: Validatable<&Customer>| {
        c.field("name", |c| &c.name).is_not_empty();
        c.field("shipping", |c| &c.shipping).validate_with(&addresses);
        c.field("billing", |c| c.billing.as_ref()).validate_with(&addresses);
    });

    let customer = Customer {
        name: "Ada".into(),
        shipping: address("", "123"),
        billing: Some(address("Main St", "1")),
    };
    let violations = customers.validate(customer).into_result().unwrap_err();
    let paths: Vec<_> = violations.iter().map(|v| v.path().clone()).collect();
    assert_eq!(
        paths,
        vec![
            Path::parse("shipping.street"),
            Path::parse("shipping.zip"),
            Path::parse("billing.zip"),
        ]
    );
}

#[test]
fn test_nested_root_path_is_kept() {
    let addresses = Validator::builder()
        .configuration(Configuration::builder().root_path("address").build())
        .build(|a: Validatable<&Address>| {
            a.field("zip", |a| &a.zip).is_not_empty();
        });
    let customers = Validator::new(move |c: Validatable<&Customer>| {
        c.field("shipping", |c| &c.shipping).validate_with(&addresses);
    });

    let customer = Customer {
        name: "Ada".into(),
        shipping: address("Main St", ""),
        billing: None,
    };
    let violations = customers.validate(customer).into_result().unwrap_err();
    assert_eq!(violations.first().path().to_string(), "shipping.address.zip");
}

#[test]
fn test_nested_messages_and_metadata_pass_through() {
    let addresses = Validator::builder()
        .configuration(Configuration::builder().default_violation_message("bad address").build())
        .build(|a: Validatable<&Address>| {
            a.constrain(|a| a.street != a.zip);
        });
    let customers = Validator::new(move |c: Validatable<&Customer>| {
        c.field("shipping", |c| &c.shipping).validate_with(&addresses);
    });

    let customer = Customer {
        name: "Ada".into(),
        shipping: address("x", "x"),
        billing: None,
    };
    let violations = customers.validate(customer).into_result().unwrap_err();
    assert_eq!(violations.first().message(), "bad address");
    assert_eq!(violations.first().path().to_string(), "shipping");
}

#[test]
fn test_contextual_delegation() {
    let blocked = ContextualValidator::new(|blocked: &HashSet<String>, a: Validatable<&Address>| {
        a.field("zip", |a| &a.zip)
            .constrain(|zip| !blocked.contains(zip))
            .otherwise(|| "We do not ship there");
    });
    let customers = Validator::new(move |c: Validatable<&Customer>| {
        let blocked_zips: HashSet<String> = ["99999".to_string()].into();
        c.field("shipping", |c| &c.shipping)
            .validate_with_context(&blocked, &blocked_zips);
    });

    let customer = Customer {
        name: "Ada".into(),
        shipping: address("Main St", "99999"),
        billing: None,
    };
    let violations = customers.validate(customer).into_result().unwrap_err();
    assert_eq!(violations.first().path().to_string(), "shipping.zip");
    assert_eq!(violations.first().message(), "We do not ship there");
}
