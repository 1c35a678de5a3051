//! End-to-end scenarios for the grid store and the call boundary

use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use sheetfake::prelude::*;

type Delivered = Rc<RefCell<Vec<String>>>;

/// Run `name` through a runner that records every delivery
fn invoke_recorded(run: &ScriptRun, name: &str) -> Delivered {
    let delivered = Delivered::default();
    let (ok, err) = (delivered.clone(), delivered.clone());
    run.with_success_handler(move |v| ok.borrow_mut().push(format!("success:{v:?}")))
        .with_failure_handler(move |e| err.borrow_mut().push(format!("failure:{e}")))
        .invoke(name, vec![]);
    delivered
}

fn date_registry() -> OperationRegistry {
    OperationRegistry::new().with("getDate", |_: &[Value]| Ok(Value::from(Temporal::now())))
}

/// Scenario A: compact text survives a write and reads back as the same text
#[test]
fn test_scenario_a_compact_round_trip() {
    let mut sheet = GridStore::empty(Locale::ZhTw);
    sheet
        .cell_at_mut(1, 1)
        .unwrap()
        .write([["2026/1/27上午9:00:00"]])
        .unwrap();

    let range = sheet.cell_at(1, 1).unwrap();
    let raw = range.read_raw();
    let temporal = raw[0][0].as_temporal().expect("stored as temporal");
    assert_eq!(temporal.hour(), Some(9));
    assert_eq!(temporal.minute(), Some(0));

    assert_eq!(range.read_display(), vec![vec!["2026/1/27上午9:00:00".to_string()]]);
}

/// Scenario B: column count follows the widest row
#[test]
fn test_scenario_b_jagged_rows() {
    let mut sheet = GridStore::with_header(["A", "B", "C"]);
    sheet.append(["1", "2"]);
    sheet.append(["1", "2", "3", "4", "5"]);

    assert_eq!(sheet.row_count(), 3);
    assert_eq!(sheet.column_count(), 5);

    // short rows read as empty text past their end
    let row = sheet.range_at(2, 1, 1, 5).unwrap().read_raw();
    assert_eq!(
        row,
        vec![vec![
            CellValue::from("1"),
            CellValue::from("2"),
            CellValue::from(""),
            CellValue::from(""),
            CellValue::from(""),
        ]]
    );
}

/// Scenario C: reads far past the data are blank rectangles
#[test]
fn test_scenario_c_beyond_data() {
    let mut sheet = GridStore::empty(Locale::ZhTw);
    for row in [["a", "b", "c"], ["d", "e", "f"], ["g", "h", "i"]] {
        sheet.append(row);
    }

    let range = sheet.range_at(10, 10, 2, 2).unwrap();
    assert_eq!(
        range.read_raw(),
        vec![
            vec![CellValue::from(""), CellValue::from("")],
            vec![CellValue::from(""), CellValue::from("")],
        ]
    );
    assert_eq!(range.read_display(), vec![vec![String::new(); 2]; 2]);
    assert_eq!(sheet.row_count(), 3);
}

/// Scenario D: lenient boundary collapses a temporal result to null
#[test]
fn test_scenario_d_lenient_temporal() {
    let queue = TaskQueue::new();
    let run = ScriptRun::new(date_registry(), RunOptions::default(), queue.clone());

    let delivered = invoke_recorded(&run, "getDate");
    assert!(delivered.borrow().is_empty());

    queue.run_until_idle();
    assert_eq!(*delivered.borrow(), vec!["success:Null".to_string()]);
    assert_eq!(run.diagnostics().len(), 1);
}

/// Scenario E: strict boundary rejects the same result
#[test]
fn test_scenario_e_strict_temporal() {
    let queue = TaskQueue::new();
    let run = ScriptRun::new(date_registry(), RunOptions::strict(), queue.clone());

    let delivered = invoke_recorded(&run, "getDate");
    queue.run_until_idle();

    let delivered = delivered.borrow();
    assert_eq!(delivered.len(), 1);
    assert!(delivered[0].starts_with("failure:"));
    assert!(delivered[0].contains("serialization"));
    assert!(delivered[0].contains("temporal value at root"));
}

/// Scenario F: unknown operations fail through the handler
#[test]
fn test_scenario_f_not_found() {
    let queue = TaskQueue::new();
    let run = ScriptRun::new(OperationRegistry::new(), RunOptions::default(), queue.clone());

    let delivered = invoke_recorded(&run, "submitOrder");
    queue.run_until_idle();

    assert_eq!(
        *delivered.borrow(),
        vec!["failure:function submitOrder not found".to_string()]
    );

    let err = run.call("anything", vec![]).unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("anything"));
}
