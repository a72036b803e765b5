//! Integration tests for table reconstruction.

use docnorm::parser::{extract_tables, table_from_grid, table_from_pipe_lines, TableBuilder};
use docnorm::render::{tables_to_json, JsonFormat};
use docnorm::{Error, TableGrid};

#[test]
fn test_grid_with_extra_cells() {
    let grid = TableGrid::new(vec![vec!["A", "B"], vec!["1", "2"], vec!["3", "4", "5"]]);
    let table = table_from_grid(&grid).unwrap();

    let json = tables_to_json(&[table], JsonFormat::Compact).unwrap();
    assert_eq!(
        json,
        r#"[{"headers":["A","B"],"data":[{"A":"1","B":"2"},{"A":"3","B":"4","列3":"5"}]}]"#
    );
}

#[test]
fn test_pipe_run_with_separator() {
    let lines: Vec<&str> = "| A | B |\n| - | - |\n| 1 | 2 |".lines().collect();
    let table = table_from_pipe_lines(&lines).unwrap();
    assert_eq!(table.headers, vec!["A", "B"]);
    assert_eq!(table.row_count(), 1);
    assert_eq!(table.column("A"), vec!["1"]);
}

#[test]
fn test_tables_without_rows_never_appear() {
    let text = "| only | header |\n\n| A |\n|---|\n|   |\n\n| B |\n| 2 |";
    let tables = extract_tables(text);
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].headers, vec!["B"]);
    assert!(tables.iter().all(|t| !t.is_empty()));
}

#[test]
fn test_separator_only_body_is_malformed() {
    let result = TableBuilder::markdown().build(vec![vec!["A", "B"], vec!["---", ":--:"]]);
    assert!(matches!(result, Err(Error::MalformedTable(_))));
}

#[test]
fn test_short_rows_and_order() {
    let grid = TableGrid::new(vec![vec!["姓名", "年龄", "城市"], vec!["张三"], vec!["李四", "30"]]);
    let table = table_from_grid(&grid).unwrap();
    assert_eq!(table.row_count(), 2);

    let keys: Vec<&str> = table.rows[1].keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["姓名", "年龄"]);
    assert_eq!(table.column("城市"), vec!["", ""]);
}

#[test]
fn test_headers_become_row_keys() {
    let grid = TableGrid::new(vec![vec![" 名称 ", "名称", ""], vec!["甲", "乙", "丙"]]);
    let table = table_from_grid(&grid).unwrap();
    assert_eq!(table.headers, vec!["名称", "名称", ""]);
    // Duplicate headers overwrite; an empty header is still a key.
    assert_eq!(table.rows[0].len(), 2);
    assert_eq!(table.rows[0]["名称"], "乙");
    assert_eq!(table.rows[0][""], "丙");
}
