//! Connection scenarios driven through parameter maps and compact records

use steel_core::connections::{
    governing, BoltGroup, BoltGroupInput, BoltInput, Capacity, Connection, EndPlateConnection, Plate, PlateInput,
    SidePlateConnection, Weld, WeldInput,
};
use steel_core::file_io::{load_schedule, save_schedule};
use steel_core::params::ParamMap;
use steel_core::report::{Report, ResultValue};
use steel_core::schedule::{DesignSchedule, EntityKind, ScheduleItem};

fn ub_460() -> ParamMap {
    ParamMap::new()
        .with("section", "460UB82.1")
        .with("sec_type", "UB")
        .with("d", 460.0)
        .with("b", 191.0)
        .with("t_f", 16.0)
        .with("t_w", 9.9)
        .with("r_1", 11.4)
        .with("grade", "GR300")
}

fn with_components(params: ParamMap, n_p: u32, t_w: f64) -> ParamMap {
    let bolt_group = BoltGroup::new(BoltGroupInput {
        n_p,
        ..Default::default()
    })
    .unwrap();
    let weld = Weld::new(WeldInput {
        t_w,
        ..Default::default()
    })
    .unwrap();
    params
        .with("bolt_group", bolt_group.to_compact().unwrap())
        .with("plate", Plate::new(PlateInput::default()).unwrap().to_compact().unwrap())
        .with("weld", weld.to_compact().unwrap())
}

#[test]
fn end_plate_governs_at_minimum_mode() {
    let conn = EndPlateConnection::from_params(&with_components(ub_460(), 5, 6.0)).unwrap();
    assert!(conn.detailing_ok());

    let min = conn
        .modes()
        .iter()
        .filter_map(|m| m.capacity.value())
        .fold(f64::INFINITY, f64::min);
    assert_eq!(conn.v_des_all(), Capacity::kn(min));
    assert_eq!(conn.v_des_all(), governing(conn.modes().iter().map(|m| m.capacity)));

    let results = conn.results();
    assert_eq!(results.number("V_des_all"), Some(min));
}

#[test]
fn side_plate_governs_at_minimum_mode() {
    let params = with_components(ub_460(), 5, 8.0)
        .with("features", "SWC")
        .with("d_ct", 65.0)
        .with("L_c", 120.0)
        .with("r_c", 10.0);
    let conn = SidePlateConnection::from_params(&params).unwrap();
    assert!(conn.detailing_ok(), "{:?}", conn.detailing.failures);
    assert_eq!(conn.modes().len(), 8);
    assert!(conn.modes().iter().all(|m| m.capacity.is_applicable()));

    let asi_min = conn
        .modes()
        .iter()
        .filter(|m| m.asi)
        .filter_map(|m| m.capacity.value())
        .fold(f64::INFINITY, f64::min);
    assert_eq!(conn.v_des_asi(), Capacity::kn(asi_min));
    assert!(conn.v_des_all().value().unwrap() <= asi_min);
}

#[test]
fn uncoped_side_plate_reports_null_cope_mode() {
    let conn = SidePlateConnection::from_params(&with_components(ub_460(), 5, 8.0)).unwrap();
    assert_eq!(conn.mode("V_g").unwrap().capacity, Capacity::NotApplicable);
    assert_ne!(conn.governing_mode().unwrap().code, "V_g");

    let results = conn.report();
    assert_eq!(results.get("V_g"), Some(&ResultValue::NotApplicable));

    let json = serde_json::to_value(&results).unwrap();
    assert!(json["V_g"].is_null());
    assert!(json["V_a"].is_number());
    assert_eq!(json["conn_type"], "WSP");
}

#[test]
fn detailing_failures_are_listed() {
    let conn = SidePlateConnection::from_params(&with_components(ub_460(), 7, 6.0)).unwrap();
    assert!(!conn.detailing_ok());

    let results = conn.report();
    assert_eq!(results.flag("detailing_OK"), Some(false));
    let listed = results.text("detailing_failures").unwrap();
    assert!(listed.contains("minimum_weld_size"));
    assert!(listed.contains("maximum_plate_depth"));
    // Capacities are still evaluated
    assert!(results.number("V_des_all").is_some());
}

#[test]
fn collapsed_gauge_is_rejected_before_any_capacity() {
    let bolt_group = serde_json::to_string(&BoltGroupInput {
        n_p: 5,
        s_g: 0.0,
        ..Default::default()
    })
    .unwrap();
    let err = SidePlateConnection::from_params(&ub_460().with("bolt_group", bolt_group)).unwrap_err();
    assert_eq!(err.error_code(), "INVALID_INPUT");
}

#[test]
fn connection_capacities_are_positive() {
    let conn = SidePlateConnection::from_params(&with_components(ub_460(), 5, 8.0)).unwrap();
    for mode in conn.modes() {
        if let Some(v) = mode.capacity.value() {
            assert!(v > 0.0 && !v.is_nan(), "{} = {}", mode.code, v);
        }
    }
}

#[test]
fn components_survive_compact_records() {
    let bolt_group = BoltGroup::new(BoltGroupInput {
        n_p: 4,
        n_g: 2,
        bolt: BoltInput {
            d_f: 24.0,
            threads_included: false,
            ..Default::default()
        },
        s_p: 80.0,
        s_g: 90.0,
    })
    .unwrap();
    let restored = BoltGroup::from_compact(&bolt_group.to_compact().unwrap()).unwrap();
    assert_eq!(restored, bolt_group);
    assert_eq!(restored.name, "4 x 2 (80p x 90g) M24 8.8/S (TX)");

    let plate = Plate::new(PlateInput {
        b_i: 180.0,
        t_i: 12.0,
        plate: "Plate GR350".to_string(),
    })
    .unwrap();
    assert_eq!(Plate::from_compact(&plate.to_compact().unwrap()).unwrap(), plate);

    let weld = Weld::new(WeldInput {
        t_w: 10.0,
        ..Default::default()
    })
    .unwrap();
    assert_eq!(Weld::from_compact(&weld.to_compact().unwrap()).unwrap(), weld);

    assert!(BoltGroup::from_compact("{not json").is_err());
}

#[test]
fn bolt_group_shear_grows_with_diameter() {
    let mut last = 0.0;
    for d_f in [12.0, 16.0, 20.0, 24.0, 30.0, 36.0] {
        let group = BoltGroup::new(BoltGroupInput {
            n_p: 3,
            bolt: BoltInput {
                d_f,
                ..Default::default()
            },
            ..Default::default()
        })
        .unwrap();
        assert!(group.phi_v_df.0 >= last, "M{} dropped below {}", d_f, last);
        last = group.phi_v_df.0;
    }

    let err = BoltGroup::new(BoltGroupInput {
        bolt: BoltInput {
            d_f: 22.0,
            ..Default::default()
        },
        ..Default::default()
    })
    .unwrap_err();
    assert_eq!(err.error_code(), "UNKNOWN_VARIANT");
}

#[test]
fn schedule_survives_save_and_load() {
    let mut schedule = DesignSchedule::new("Test", "T-100", "Connection schedule");
    schedule.add_item(ScheduleItem::new(
        "FEP-1",
        EntityKind::EndPlate,
        with_components(ub_460(), 5, 6.0),
    ));
    schedule.add_item(ScheduleItem::new(
        "WSP-1",
        EntityKind::SidePlate,
        with_components(ub_460(), 5, 8.0),
    ));
    schedule.add_item(ScheduleItem::new(
        "WSP-2",
        EntityKind::SidePlate,
        ub_460().with("bolt_group", "{broken"),
    ));

    let path = std::env::temp_dir().join(format!("steel_core_it_connection_{}.sds", std::process::id()));
    save_schedule(&schedule, &path).unwrap();
    let loaded = load_schedule(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(loaded.item_count(), 3);
    let before = schedule.evaluate();
    let after = loaded.evaluate();
    assert_eq!(before.len(), after.len());
    for (b, a) in before.iter().zip(&after) {
        assert_eq!(b.id, a.id);
        assert_eq!(b.label, a.label);
        match (&b.result, &a.result) {
            (Ok(rb), Ok(ra)) => assert_eq!(serde_json::to_value(rb).unwrap(), serde_json::to_value(ra).unwrap()),
            (Err(eb), Err(ea)) => assert_eq!(eb.error_code(), ea.error_code()),
            _ => panic!("{} changed outcome after reload", b.label),
        }
    }

    let broken = after.iter().find(|o| o.label == "WSP-2").unwrap();
    assert_eq!(broken.result.as_ref().unwrap_err().error_code(), "INVALID_INPUT");
}
