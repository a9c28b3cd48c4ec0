use sensorthings_core::codec;
use sensorthings_core::{FeatureOfInterest, MalformedValue, Outcome, UnknownReason};
use serde_json::json;
use std::io;
use std::sync::{Arc, Mutex};

/// Shared buffer the subscriber writes formatted events into.
#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn logs_of<T>(f: impl FnOnce() -> T) -> (T, String) {
    let capture = Capture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    let text = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
    (result, text)
}

#[test]
fn malformed_annotations_are_logged() {
    let (decoded, logs) = logs_of(|| {
        codec::decode::<FeatureOfInterest>(json!({
            "@iot.selfLink": "not a uri",
            "Observations@iot.count": -4,
            "Observations@iot.nextLink": "next page please"
        }))
        .unwrap()
    });

    assert_eq!(
        decoded.outcome("@iot.selfLink"),
        Some(Outcome::Malformed(MalformedValue::SelfLink))
    );
    assert_eq!(
        decoded.outcome("Observations@iot.count"),
        Some(Outcome::Malformed(MalformedValue::Count))
    );

    let self_link = logs
        .lines()
        .find(|line| line.contains("Invalid selfLink"))
        .expect("selfLink event");
    assert!(self_link.contains("WARN"), "{self_link}");
    assert!(self_link.contains("not a uri"), "{self_link}");

    let count = logs
        .lines()
        .find(|line| line.contains("Count should be a non-negative number"))
        .expect("count event");
    assert!(count.contains("ERROR"), "{count}");
    assert!(count.contains("Observations@iot.count"), "{count}");

    let next = logs
        .lines()
        .find(|line| line.contains("Invalid nextLink"))
        .expect("nextLink event");
    assert!(next.contains("WARN"), "{next}");
}

#[test]
fn dropped_names_are_logged() {
    let (decoded, logs) = logs_of(|| {
        codec::decode::<FeatureOfInterest>(json!({
            "unknown@thing": "z",
            "Things@iot.count": 2
        }))
        .unwrap()
    });

    assert_eq!(
        decoded.outcome("unknown@thing"),
        Some(Outcome::Unknown(UnknownReason::EntityType))
    );
    assert_eq!(
        decoded.outcome("Things@iot.count"),
        Some(Outcome::Unknown(UnknownReason::Navigation))
    );

    assert!(
        logs.lines()
            .any(|line| line.contains("Unknown entity type in property")
                && line.contains("unknown@thing")),
        "{logs}"
    );
    assert!(
        logs.lines()
            .any(|line| line.contains("Entity has no such navigation property")
                && line.contains("Things@iot.count")),
        "{logs}"
    );
}

#[test]
fn applied_annotations_are_quiet() {
    let (decoded, logs) = logs_of(|| {
        codec::decode::<FeatureOfInterest>(json!({
            "@iot.selfLink": "FeaturesOfInterest(1)",
            "Observations@iot.count": 4,
            "Observations@iot.nextLink": "Observations?$skip=100"
        }))
        .unwrap()
    });

    assert_eq!(decoded.dropped().count(), 0);
    assert!(!logs.contains("WARN"), "{logs}");
    assert!(!logs.contains("ERROR"), "{logs}");
}
