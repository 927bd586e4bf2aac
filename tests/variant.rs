use histaxis::axis::{Axis, AxisOptions, Category, Integer, Regular};
use histaxis::transform::{Log, Pow, Sqrt};
use histaxis::variant::{AnyAxis, AxisVariant, Narrow};
use histaxis::{Error, ErrorKind, axis_variant};

axis_variant! {
    /// Real-valued axes only.
    #[derive(serde::Serialize)]
    pub enum RealAxis {
        Linear(Regular),
        Log(Regular<f64, Log>),
    }
}

axis_variant! {
    enum Unlabeled {
        Regular(Regular<f64, Sqrt, ()>),
        Integer(Integer<()>),
    }
}

/// Axis over the weekdays, indexed by name; no numeric edges.
#[derive(Debug, Clone, PartialEq)]
struct Weekday {
    label: String,
}

const DAYS: [&str; 7] = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"];

impl Axis for Weekday {
    type Value = String;
    type Metadata = String;

    fn size(&self) -> i32 {
        7
    }

    fn options(&self) -> AxisOptions {
        AxisOptions::OVERFLOW
    }

    fn index(&self, value: &String) -> i32 {
        DAYS.iter().position(|d| d == value).map_or(7, |i| i as i32)
    }

    fn metadata(&self) -> &String {
        &self.label
    }

    fn metadata_mut(&mut self) -> &mut String {
        &mut self.label
    }
}

axis_variant! {
    enum Calendar {
        Hour(Regular),
        Day(Weekday),
    }
}

fn linear() -> Regular {
    Regular::new(4, -2.0, 2.0).unwrap()
}

fn log() -> Regular<f64, Log> {
    Regular::with_transform(Log, 2, 1.0, 100.0).unwrap()
}

#[test]
fn test_any_axis_holds_every_shipped_axis() {
    let axes = vec![
        AnyAxis::from(linear()),
        AnyAxis::from(log()),
        AnyAxis::from(Regular::with_transform(Sqrt, 2, 0.0, 4.0).unwrap()),
        AnyAxis::from(Regular::with_transform(Pow::new(2.0), 2, 0.0, 2.0).unwrap()),
        AnyAxis::from(Regular::circular(4, 0.0, 1.0).unwrap()),
        AnyAxis::from(Integer::new(0, 3).unwrap()),
        AnyAxis::from(Category::new(["a", "b"].map(String::from))),
    ];

    let sizes: Vec<i32> = axes.iter().map(|a| a.size()).collect();
    assert_eq!(sizes, vec![4, 2, 2, 2, 4, 3, 2]);

    let shapes: Vec<i32> = axes.iter().map(|a| a.shape()).collect();
    assert_eq!(shapes, vec![6, 4, 4, 4, 5, 5, 3]);
}

#[test]
fn test_variant_index_matches_concrete_axis() {
    let concrete = log();
    let variant = RealAxis::from(concrete.clone());

    for x in [-1.0, 0.0, 1.0, 9.0, 10.0, 90.0, 100.0, f64::INFINITY] {
        assert_eq!(variant.index(&x).unwrap(), concrete.index(&x));
    }
}

#[test]
fn test_custom_axis_without_value_method() {
    let mut axis = Calendar::from(Weekday {
        label: "day".to_owned(),
    });

    assert_eq!(axis.index(&"wed").unwrap(), 2);
    assert_eq!(axis.index(&"holiday".to_owned()).unwrap(), 7);
    assert_eq!(axis.shape(), 8);

    let err = axis.index(&3).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Capability);

    let err = axis.value(0.0).unwrap_err();
    assert!(matches!(err, Error::NoValueMethod { .. }));
    assert!(axis.bins().is_err());

    let err = axis.as_display().map(|_| ()).unwrap_err();
    assert!(matches!(err, Error::NotDisplayable { .. }));
    assert_eq!(err.kind(), ErrorKind::Capability);

    axis.set_label("weekday").unwrap();
    assert_eq!(axis.label().unwrap(), "weekday");
    assert_eq!(axis.cast::<Weekday>().unwrap().label, "weekday");
}

#[test]
fn test_unlabeled_metadata() {
    let mut axis = Unlabeled::from(Integer::build(0, 3, (), AxisOptions::DEFAULT).unwrap());

    assert_eq!(axis.metadata().unwrap(), &());
    assert!(matches!(axis.label(), Err(Error::Unlabeled { .. })));
    assert!(matches!(axis.set_label("n"), Err(Error::Unlabeled { .. })));
    assert_eq!(axis.value(1.0).unwrap(), 1.0);
}

#[test]
fn test_metadata_mismatch_names_both_types() {
    axis_variant! {
        enum Mixed {
            Labeled(Regular),
            Bare(Integer<()>),
        }
    }

    let axis = Mixed::from(Integer::build(0, 3, (), AxisOptions::DEFAULT).unwrap());
    let message = axis.metadata().unwrap_err().to_string();

    assert!(message.contains("()"));
    assert!(message.contains("String"));
}

#[test]
fn test_cross_variant_equality() {
    let any = AnyAxis::from(log());
    let real = RealAxis::from(log());

    assert!(any.eq_variant(&real));
    assert!(real.eq_variant(&any));
    assert!(!real.eq_variant(&AnyAxis::from(linear())));
    assert!(any == log());
    assert!(any != linear());
}

#[test]
fn test_cross_variant_conversion() {
    let real = RealAxis::try_from_variant(&AnyAxis::from(linear())).unwrap();
    assert_eq!(real, RealAxis::Linear(linear()));

    let err = RealAxis::try_from_variant(&AnyAxis::from(Integer::new(0, 1).unwrap())).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conversion);
    assert!(err.to_string().contains("RealAxis"));

    let mut any = AnyAxis::from(Integer::new(0, 1).unwrap());
    any.assign(&real).unwrap();
    assert_eq!(any.get::<Regular>(), Some(&linear()));
}

#[test]
fn test_narrowing_generic_code() {
    fn lower_edge<A: Narrow>(axis: &A) -> histaxis::Result<f64> {
        Ok(axis.cast::<Regular>()?.value(0.0))
    }

    assert_eq!(lower_edge(&linear()).unwrap(), -2.0);
    assert_eq!(lower_edge(&AnyAxis::from(linear())).unwrap(), -2.0);
    assert_eq!(lower_edge(&RealAxis::from(linear())).unwrap(), -2.0);

    let err = lower_edge(&log()).unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }));
}

#[test]
fn test_variant_bins_match_concrete_bins() {
    let concrete = linear();
    let variant = AnyAxis::from(concrete.clone());

    let from_variant: Vec<(f64, f64)> = variant
        .bins()
        .unwrap()
        .map(|b| (b.lower(), b.upper()))
        .collect();
    let from_concrete: Vec<(f64, f64)> = concrete.bins().map(|b| (b.lower(), b.upper())).collect();
    assert_eq!(from_variant, from_concrete);

    assert_eq!(variant.bin(-1).unwrap(), concrete.bin(-1));
    assert_eq!(variant.lower(2).unwrap(), 0.0);
}

#[test]
fn test_variant_serializes_active_axis() {
    let json = serde_json::to_value(RealAxis::from(linear())).unwrap();
    assert_eq!(json["Linear"]["size"], 4);
}
