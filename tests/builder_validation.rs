use carlot::construct::{Rejection, Vehicle};
use carlot::datatype::{Colour, Decimal};
use carlot::error::CarlotError;

fn price(s: &str) -> Decimal {
    s.parse().expect("decimal")
}

fn rejections_of(result: carlot::error::Result<Vehicle>) -> Vec<Rejection> {
    match result {
        Err(CarlotError::Validation(rejections)) => rejections,
        other => panic!("expected a validation failure, got {other:?}"),
    }
}

#[test]
fn model_accepted_iff_uppercase_words() {
    let accepted = ["AUDI", "ALFA ROMEO", "A B C", "X"];
    for model in &accepted {
        let builder = Vehicle::builder().model(model);
        assert!(builder.rejections().is_empty(), "{model} should be accepted");
    }
    let rejected = ["audi", "Audi", "AUDI4", "", "BMW-X", "ŁADA"];
    for model in &rejected {
        let builder = Vehicle::builder().model(model);
        assert_eq!(
            builder.rejections(),
            &[Rejection::Model(model.to_string())],
            "{model} should be rejected"
        );
    }
}

#[test]
fn price_must_be_strictly_positive() {
    assert!(Vehicle::builder().price(price("0.01")).rejections().is_empty());
    assert!(Vehicle::builder().price(price("125000")).rejections().is_empty());
    for bad in ["0", "0.00", "-1", "-0.5"] {
        let builder = Vehicle::builder().price(price(bad));
        assert_eq!(builder.rejections().len(), 1, "{bad} should be rejected");
    }
}

#[test]
fn mileage_must_be_strictly_positive() {
    assert!(Vehicle::builder().mileage(1).rejections().is_empty());
    assert_eq!(
        Vehicle::builder().mileage(0).rejections(),
        &[Rejection::Mileage(0)]
    );
    assert_eq!(
        Vehicle::builder().mileage(-20).rejections(),
        &[Rejection::Mileage(-20)]
    );
}

#[test]
fn one_bad_component_rejects_the_whole_list() {
    let builder = Vehicle::builder().components(&["ABS", "air bag", "GPS"]);
    assert_eq!(
        builder.rejections(),
        &[Rejection::Component("air bag".to_string())]
    );
    let rejections = rejections_of(
        builder
            .model("AUDI")
            .price(price("100"))
            .colour(Colour::Red)
            .mileage(10)
            .build(),
    );
    assert!(rejections.contains(&Rejection::Missing("components")));
}

#[test]
fn empty_component_list_is_accepted() {
    let empty: [&str; 0] = [];
    let vehicle = Vehicle::builder()
        .model("AUDI")
        .price(price("100"))
        .colour(Colour::Red)
        .mileage(10)
        .components(&empty)
        .build()
        .expect("vehicle");
    assert!(vehicle.components().is_empty());
}

#[test]
fn build_collects_every_problem() {
    let rejections = rejections_of(
        Vehicle::builder()
            .model("audi")
            .price(price("-5"))
            .mileage(7)
            .build(),
    );
    assert_eq!(
        rejections,
        vec![
            Rejection::Model("audi".to_string()),
            Rejection::Price("-5".to_string()),
            Rejection::Missing("model"),
            Rejection::Missing("price"),
            Rejection::Missing("colour"),
            Rejection::Missing("components"),
        ]
    );
}

#[test]
fn later_valid_value_does_not_hide_earlier_rejection() {
    let result = Vehicle::builder()
        .model("bad")
        .model("GOOD")
        .price(price("1"))
        .colour(Colour::Blue)
        .mileage(1)
        .components(&["ABS"])
        .build();
    assert_eq!(rejections_of(result), vec![Rejection::Model("bad".to_string())]);
}

#[test]
fn built_vehicle_exposes_its_fields() {
    let vehicle = Vehicle::builder()
        .model("ALFA ROMEO")
        .price(price("45000.50"))
        .colour(Colour::Silver)
        .mileage(32000)
        .components(&["GPS", "ABS"])
        .build()
        .expect("vehicle");
    assert_eq!(vehicle.model(), "ALFA ROMEO");
    assert_eq!(vehicle.price(), &price("45000.5"));
    assert_eq!(vehicle.colour(), Colour::Silver);
    assert_eq!(vehicle.mileage(), 32000);
    assert_eq!(vehicle.components(), &["GPS".to_string(), "ABS".to_string()]);
    assert!(vehicle.has_component("ABS"));
    assert_eq!(
        vehicle.to_string(),
        "Car{model='ALFA ROMEO', price=45000.50, colour=SILVER, mileage=32000, components=[GPS, ABS]}"
    );
}
