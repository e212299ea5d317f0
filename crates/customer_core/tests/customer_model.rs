use customer_core::{Customer, Document};
use uuid::Uuid;

#[test]
fn customer_serialization_uses_camel_case_fields() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let customer = Customer::new("Alice", "Smith").with_id(id);

    let json = serde_json::to_value(&customer).unwrap();
    assert_eq!(json["id"], id.to_string());
    assert_eq!(json["firstName"], "Alice");
    assert_eq!(json["lastName"], "Smith");

    let decoded: Customer = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, customer);
}

#[test]
fn unsaved_customer_serializes_without_id() {
    let json = serde_json::to_value(Customer::new("Bob", "Smith")).unwrap();

    assert!(json.get("id").is_none());
}

#[test]
fn deserialize_requires_both_names() {
    let value = serde_json::json!({ "firstName": "Alice" });

    let err = serde_json::from_value::<Customer>(value).unwrap_err();
    assert!(err.to_string().contains("lastName"), "unexpected error: {err}");
}

#[test]
fn document_contract_uses_customer_collection() {
    let id = Uuid::new_v4();
    let customer = Customer::new("Alice", "Smith");
    assert_eq!(Customer::COLLECTION, "customer");
    assert_eq!(Document::id(&customer), None);

    let saved = customer.with_id(id);
    assert_eq!(Document::id(&saved), Some(id));
    assert!(saved.is_persisted());
}
