//! # steel_cli
//!
//! Command-line driver for `steel_core` design schedules.
//!
//! ```text
//! steel_cli [SCHEDULE.sds] [--json] [--save PATH]
//! ```
//!
//! Without a schedule path a built-in demo schedule is evaluated. `--json`
//! prints the results as JSON instead of aligned text; `--save` writes the
//! evaluated schedule to PATH.

mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use serde_json::{json, Value};

use steel_core::connections::{BoltGroup, BoltGroupInput, Plate, PlateInput, Weld, WeldInput};
use steel_core::file_io::{load_schedule_with_lock_check, save_schedule, FileLock};
use steel_core::params::ParamMap;
use steel_core::schedule::{DesignSchedule, EntityKind, ItemOutcome, ScheduleItem};

#[derive(Debug, Default, PartialEq)]
struct Args {
    schedule: Option<PathBuf>,
    json: bool,
    save: Option<PathBuf>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut parsed = Args::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => parsed.json = true,
            "--save" => {
                let path = args.next().context("--save needs a path")?;
                parsed.save = Some(PathBuf::from(path));
            }
            flag if flag.starts_with("--") => bail!("unknown option '{}'", flag),
            path => {
                if parsed.schedule.is_some() {
                    bail!("only one schedule path may be given");
                }
                parsed.schedule = Some(PathBuf::from(path));
            }
        }
    }
    Ok(parsed)
}

fn main() -> ExitCode {
    logging::init();

    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every item evaluated
fn run() -> Result<bool> {
    let args = parse_args(std::env::args().skip(1))?;

    let schedule = match &args.schedule {
        Some(path) => {
            let (schedule, lock) = load_schedule_with_lock_check(path)
                .with_context(|| format!("loading schedule {}", path.display()))?;
            if let Some(lock) = lock {
                tracing::warn!(user = %lock.user_id, machine = %lock.machine, "schedule is locked, reading only");
            }
            schedule
        }
        None => {
            tracing::info!("no schedule given, evaluating the demo schedule");
            demo_schedule()?
        }
    };

    let outcomes = schedule.evaluate();
    if args.json {
        let doc = schedule_json(&schedule, &outcomes);
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        print_text(&schedule, &outcomes);
    }

    if let Some(path) = &args.save {
        let _lock = FileLock::acquire(path, whoami()).with_context(|| format!("locking {}", path.display()))?;
        save_schedule(&schedule, path).with_context(|| format!("saving schedule {}", path.display()))?;
    }

    Ok(outcomes.iter().all(|o| o.result.is_ok()))
}

fn whoami() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "steel_cli".to_string())
}

fn print_text(schedule: &DesignSchedule, outcomes: &[ItemOutcome]) {
    println!("{} - {} ({})", schedule.meta.job_id, schedule.meta.description, schedule.settings.standard);
    println!();
    for outcome in outcomes {
        println!("== {} [{}] ==", outcome.label, outcome.kind);
        match &outcome.result {
            Ok(results) => print!("{}", results),
            Err(e) => println!("  ERROR {}: {}", e.error_code(), e),
        }
        println!();
    }
    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    println!("{} items, {} failed", outcomes.len(), failed);
}

fn schedule_json(schedule: &DesignSchedule, outcomes: &[ItemOutcome]) -> Value {
    let items: Vec<Value> = outcomes
        .iter()
        .map(|o| {
            let mut item = json!({
                "id": o.id,
                "label": o.label,
                "kind": o.kind,
            });
            match &o.result {
                Ok(results) => item["results"] = json!(results),
                Err(e) => item["error"] = json!(e),
            }
            item
        })
        .collect();
    json!({
        "job_id": schedule.meta.job_id,
        "standard": schedule.settings.standard,
        "items": items,
    })
}

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

/// A small schedule covering each entity kind
fn demo_schedule() -> Result<DesignSchedule> {
    let mut schedule = DesignSchedule::new("Demo", "DEMO-001", "steel_core demo schedule");

    schedule.add_item(ScheduleItem::new(
        "C-1",
        EntityKind::Member,
        ParamMap::new()
            .with("section", "250UC89.5")
            .with("sec_type", "UC")
            .with("d", 260.0)
            .with("b", 256.0)
            .with("t_f", 17.3)
            .with("t_w", 10.5)
            .with("r_1", 13.0)
            .with("grade", "GR300")
            .with("l_ex", 4000.0)
            .with("l_ey", 4000.0),
    ));
    schedule.add_item(ScheduleItem::new(
        "C-2",
        EntityKind::Member,
        ParamMap::new()
            .with("section", "200x200x5SHS")
            .with("sec_type", "SHS")
            .with("d", 200.0)
            .with("b", 200.0)
            .with("t", 5.0)
            .with("r_o", 12.5)
            .with("mat_type", "HollowSection")
            .with("grade", "C450")
            .with("l_ex", 3800.0)
            .with("l_ey", 3800.0),
    ));
    schedule.add_item(ScheduleItem::new(
        "B-1",
        EntityKind::Member,
        ub_460().with("l_eb", 6000.0).with("alpha_m", 1.13),
    ));

    let bolt_group = BoltGroup::new(BoltGroupInput {
        n_p: 5,
        ..Default::default()
    })?;
    let plate = Plate::new(PlateInput::default())?;
    let weld = Weld::new(WeldInput {
        t_w: 8.0,
        ..Default::default()
    })?;

    schedule.add_item(ScheduleItem::new(
        "BG-1",
        EntityKind::BoltGroup,
        ParamMap::new().with("n_p", 5u32).with("n_g", 2u32),
    ));
    schedule.add_item(ScheduleItem::new(
        "FEP-1",
        EntityKind::EndPlate,
        ub_460()
            .with("bolt_group", bolt_group.to_compact()?)
            .with("plate", plate.to_compact()?)
            .with("weld", weld.to_compact()?),
    ));
    schedule.add_item(ScheduleItem::new(
        "WSP-1",
        EntityKind::SidePlate,
        ub_460()
            .with("features", "SWC")
            .with("d_ct", 65.0)
            .with("L_c", 120.0)
            .with("r_c", 10.0)
            .with("bolt_group", bolt_group.to_compact()?)
            .with("plate", plate.to_compact()?)
            .with("weld", weld.to_compact()?),
    ));

    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_args() {
        assert_eq!(args(&[]).unwrap(), Args::default());
        let parsed = args(&["jobs/level2.sds", "--json"]).unwrap();
        assert_eq!(parsed.schedule, Some(PathBuf::from("jobs/level2.sds")));
        assert!(parsed.json);
        assert!(args(&["--save"]).is_err());
        assert!(args(&["--verbose"]).is_err());
        assert!(args(&["a.sds", "b.sds"]).is_err());
    }

    #[test]
    fn test_demo_schedule_evaluates() {
        logging::init_test();
        let schedule = demo_schedule().unwrap();
        let outcomes = schedule.evaluate();
        assert_eq!(outcomes.len(), 6);
        for outcome in &outcomes {
            assert!(outcome.result.is_ok(), "{} failed: {:?}", outcome.label, outcome.result);
        }
    }

    #[test]
    fn test_json_document() {
        let schedule = demo_schedule().unwrap();
        let outcomes = schedule.evaluate();
        let doc = schedule_json(&schedule, &outcomes);
        assert_eq!(doc["job_id"], "DEMO-001");
        let items = doc["items"].as_array().unwrap();
        assert_eq!(items[0]["label"], "B-1");
        assert!(items.iter().all(|i| i.get("results").is_some()));
    }
}
