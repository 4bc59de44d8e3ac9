use super::*;

fn row_json(team: &str) -> serde_json::Value {
    serde_json::json!({
        "id": 7,
        "created_at": "2025-01-05T10:00:00.123456+00:00",
        "first_name": "Peter",
        "last_name": "Kovac",
        "email": "peter@example.com",
        "phone": null,
        "team": team,
        "cancel_code": "ABCD2345",
        "status": "active"
    })
}

#[test]
fn registration_deserializes_store_row() {
    let row: Registration = serde_json::from_value(row_json("black")).unwrap();
    assert_eq!(row.id, 7);
    assert_eq!(row.team, Team::Black);
    assert_eq!(row.status, RegistrationStatus::Active);
    assert_eq!(row.phone, None);
    assert_eq!(row.created_at.year(), 2025);
}

#[test]
fn registration_rejects_unknown_team() {
    assert!(serde_json::from_value::<Registration>(row_json("red")).is_err());
}

#[test]
fn short_name_uses_last_name_initial() {
    let row: Registration = serde_json::from_value(row_json("white")).unwrap();
    assert_eq!(row.short_name(), "Peter K.");
}

#[test]
fn short_name_without_last_name_is_first_name_only() {
    assert_eq!(short_name("Peter", "   "), "Peter");
    assert_eq!(short_name("Peter", " ľubo"), "Peter ľ.");
}

#[test]
fn new_registration_serializes_lowercase_tags() {
    let new = NewRegistration {
        first_name: "Jana".into(),
        last_name: "Novak".into(),
        email: "jana@example.com".into(),
        phone: None,
        team: Team::Sub,
        cancel_code: "ZZZZ2222".into(),
        status: RegistrationStatus::Active,
    };
    let value = serde_json::to_value(&new).unwrap();
    assert_eq!(value["team"], "sub");
    assert_eq!(value["status"], "active");
    assert!(value["phone"].is_null());
    assert!(value.get("id").is_none());
}

#[test]
fn team_labels() {
    assert_eq!(Team::White.label(), "White");
    assert_eq!(Team::Black.label(), "Black");
    assert_eq!(Team::Sub.label(), "Substitute");
}
