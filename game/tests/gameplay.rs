//! End-to-end flow: Overpass-style payload and GeoJSON boundary in, rounds of gameplay out.

use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

use game::{Difficulty, Session};
use geom::LonLat;
use map_model::raw::{extract_osm_roads, Boundary};
use map_model::StreetCatalog;

// A little downtown grid: two major streets crossing, a residential street crossing one of them,
// and a road lying outside the boundary.
const PAYLOAD: &str = r#"{
    "elements": [
        {
            "type": "way",
            "tags": {"name": "Main St", "highway": "trunk"},
            "geometry": [
                {"lon": -122.34, "lat": 47.60},
                {"lon": -122.32, "lat": 47.60}
            ]
        },
        {
            "type": "way",
            "tags": {"name": "1st Ave", "highway": "primary"},
            "geometry": [
                {"lon": -122.33, "lat": 47.59},
                {"lon": -122.33, "lat": 47.61}
            ]
        },
        {
            "type": "way",
            "tags": {"name": "Quiet Ln", "highway": "residential"},
            "geometry": [
                {"lon": -122.335, "lat": 47.595},
                {"lon": -122.325, "lat": 47.605}
            ]
        },
        {
            "type": "way",
            "tags": {"name": "Far Away Rd", "highway": "residential"},
            "geometry": [
                {"lon": -120.0, "lat": 45.0},
                {"lon": -120.0, "lat": 45.1}
            ]
        }
    ]
}"#;

fn load_session(difficulty: Difficulty) -> Session {
    let _ = env_logger::builder().is_test(true).try_init();
    let roads = extract_osm_roads(PAYLOAD).unwrap();
    let boundary = Boundary::from_geojson(&geojson::Geometry::new(geojson::Value::Polygon(vec![
        vec![
            vec![-122.4, 47.5],
            vec![-122.2, 47.5],
            vec![-122.2, 47.7],
            vec![-122.4, 47.7],
            vec![-122.4, 47.5],
        ],
    ])))
    .unwrap();
    let catalog = StreetCatalog::build(roads, Some(&boundary));
    Session::new(catalog, difficulty)
}

#[test]
fn boundary_excludes_distant_roads() {
    let session = load_session(Difficulty::AnyAny);
    assert_eq!(session.catalog().len(), 3);
    assert!(session.catalog().get("Far Away Rd").is_none());
}

#[test]
fn rounds_until_exhaustion() {
    let mut session = load_session(Difficulty::MajorMajor);
    let mut rng = XorShiftRng::seed_from_u64(42);

    // At major-major, only Main St & 1st Ave qualifies.
    let candidate = session.next_round(&mut rng).unwrap().clone();
    let mut streets = vec![candidate.street1.clone(), candidate.street2.clone()];
    streets.sort();
    assert_eq!(streets, vec!["1st Ave".to_string(), "Main St".to_string()]);

    let result = session.submit_guess(candidate.primary().pt).unwrap();
    assert_eq!(result.score, 1000);

    assert!(session.next_round(&mut rng).is_none());

    // Dropping the difficulty opens up the residential crossings.
    session.set_difficulty(Difficulty::AnyAny);
    assert!(session.next_round(&mut rng).is_some());
}

#[test]
fn street_hunt() {
    let mut session = load_session(Difficulty::AnyAny);

    let results = session.enter_streets("main, 1st avenue, quiet");
    assert_eq!(
        results,
        vec![
            vec!["Main St".to_string()],
            vec!["1st Ave".to_string()],
            vec!["Quiet Ln".to_string()],
        ]
    );
    assert_eq!(session.found_streets().len(), 3);

    let guess = LonLat::new(-122.33, 47.60);
    assert!(session.submit_guess(guess).is_none());
}
