use std::io::Cursor;

use carlot::construct::{Garage, Vehicle};
use carlot::datatype::{Colour, Decimal};
use carlot::menu::{split_components, Menu};
use carlot::persist::PersistenceMode;
use carlot::settings::Compatibility;

fn car(model: &str, price: i64, colour: Colour, mileage: i64, components: &[&str]) -> Vehicle {
    Vehicle::builder()
        .model(model)
        .price(Decimal::from(price))
        .colour(colour)
        .mileage(mileage)
        .components(components)
        .build()
        .expect("valid vehicle")
}

struct Session {
    garage: Garage,
    out: String,
    err: String,
}

fn run(garage: Garage, script: &str) -> Session {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let mut menu = Menu::new(
        garage,
        Compatibility::Corrected,
        Cursor::new(script.as_bytes().to_vec()),
        &mut out,
        &mut err,
    );
    menu.run().expect("session");
    let garage = menu.into_garage();
    Session {
        garage,
        out: String::from_utf8(out).expect("utf8"),
        err: String::from_utf8(err).expect("utf8"),
    }
}

fn stocked() -> Garage {
    let mut garage = Garage::new(PersistenceMode::InMemory).expect("garage");
    garage.add(car("AUDI", 200, Colour::Red, 300, &["GPS", "ABS"])).unwrap();
    garage.add(car("BMW", 100, Colour::Blue, 100, &["ABS"])).unwrap();
    garage
}

#[test]
fn quits_on_x_in_either_case() {
    let session = run(stocked(), "X\n");
    assert!(session.out.contains("1) Add new car"));
    assert!(session.out.contains("11) Get cars by price between..."));
    assert!(session.out.contains("Press X to quit"));
    assert!(session.err.is_empty());
}

#[test]
fn end_of_input_ends_the_session() {
    let session = run(stocked(), "2\n");
    assert!(session.out.contains("Car{model='AUDI'"));
    assert!(session.out.contains("Car{model='BMW'"));
}

#[test]
fn unknown_option_asks_again() {
    let session = run(stocked(), "42\nx\n");
    assert!(session.out.contains("Wrong option - choose again!"));
    assert_eq!(session.out.matches("Press X to quit").count(), 2);
}

#[test]
fn adds_a_car_from_prompts() {
    let session = run(
        stocked(),
        "1\nFIAT\n25000.99\nWHITE\n900\nABS,AIR BAG\nx\n",
    );
    assert!(session.out.contains("Car added"), "{}", session.out);
    assert_eq!(session.garage.len(), 3);
    let fiat = session
        .garage
        .vehicles()
        .find(|v| v.model() == "FIAT")
        .expect("fiat kept");
    assert_eq!(fiat.components(), &["ABS".to_string(), "AIR BAG".to_string()]);
    assert_eq!(fiat.price(), &"25000.99".parse::<Decimal>().unwrap());
}

#[test]
fn trailing_commas_in_components_are_dropped() {
    let session = run(stocked(), "1\nFIAT\n900\nWHITE\n900\nABS,GPS,\nx\n");
    assert!(session.out.contains("Car added"), "{}", session.err);
    let fiat = session
        .garage
        .vehicles()
        .find(|v| v.model() == "FIAT")
        .expect("fiat kept");
    assert_eq!(fiat.components(), &["ABS".to_string(), "GPS".to_string()]);
}

#[test]
fn splits_components_the_way_the_console_reads_them() {
    assert_eq!(split_components("ABS,GPS,,"), vec!["ABS", "GPS"]);
    assert_eq!(split_components("ABS,,GPS"), vec!["ABS", "", "GPS"]);
    assert_eq!(split_components(""), vec![""]);
    assert!(split_components(",,").is_empty());
}

#[test]
fn mileage_beyond_a_32_bit_integer_is_a_parse_error() {
    let session = run(stocked(), "1\nFIAT\n900\nWHITE\n3000000000\nABS\nx\n");
    assert!(session.err.contains("'3000000000' is not a valid integer"), "{}", session.err);
    assert_eq!(session.garage.len(), 2);
}

#[test]
fn malformed_number_aborts_only_that_action() {
    let session = run(stocked(), "1\nFIAT\nlots\n2\nx\n");
    assert!(session.err.contains("'lots' is not a valid decimal number"), "{}", session.err);
    assert_eq!(session.garage.len(), 2);
    assert!(session.out.contains("Car{model='BMW'"));
}

#[test]
fn rejected_fields_abort_the_add() {
    let session = run(stocked(), "1\nfiat\n10\nRED\n-4\nABS\nx\n");
    assert!(session.err.contains("Validation failed"), "{}", session.err);
    assert!(session.err.contains("model 'fiat'"));
    assert!(session.err.contains("mileage -4"));
    assert_eq!(session.garage.len(), 2);
}

#[test]
fn empty_store_aggregations_are_reported_not_fatal() {
    let garage = Garage::new(PersistenceMode::InMemory).expect("garage");
    let session = run(garage, "5\n6\n2\nx\n");
    assert_eq!(session.err.matches("Invalid state [CODE_250]").count(), 2, "{}", session.err);
    assert_eq!(session.out.matches("Press X to quit").count(), 4);
}

#[test]
fn sorts_by_prompted_criterion() {
    let session = run(stocked(), "3\nPRICE\nY\nx\n");
    let audi = session.out.find("Car{model='AUDI'").expect("audi listed");
    let bmw = session.out.find("Car{model='BMW'").expect("bmw listed");
    assert!(audi < bmw);

    let session = run(stocked(), "3\nSPEED\nx\n");
    assert!(session.err.contains("'SPEED' is not a valid criterion"));
}

#[test]
fn prints_maps_as_key_value_lines() {
    let session = run(stocked(), "8\n4\nx\n");
    assert!(session.out.contains("RED 1\nBLUE 1\n"), "{}", session.out);
    assert!(session.out.contains("BMW Car{model='BMW'"));
    let bmw = session.out.find("BMW Car{").unwrap();
    let audi = session.out.find("AUDI Car{").unwrap();
    assert!(bmw < audi);
}

#[test]
fn filters_by_mileage_and_price() {
    let session = run(stocked(), "7\n150\n11\n50\n150\nx\n");
    let listed: Vec<&str> = session
        .out
        .lines()
        .filter(|l| l.starts_with("Car{"))
        .collect();
    assert_eq!(listed.len(), 2);
    assert!(listed[0].contains("AUDI"));
    assert!(listed[1].contains("BMW"));
}

#[test]
fn sorts_components_and_maps_them() {
    let session = run(stocked(), "9\n10\nx\n");
    assert!(session.out.contains("components=[ABS, GPS]"));
    assert!(session.out.contains("GPS [Car{model='AUDI'"));
    let gps = session.out.find("GPS [").unwrap();
    let abs = session.out.find("ABS [").unwrap();
    assert!(gps < abs);
}

#[test]
fn prints_statistics() {
    let session = run(stocked(), "5\nx\n");
    assert!(session.out.contains("MileageStatistics[min=100, max=300, average=200]"));
    assert!(session.out.contains("PriceStatistics[min=100, max=200, average=150]"));
}
