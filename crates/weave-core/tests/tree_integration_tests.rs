//! Integration tests for the tree model, printer and style loading

use std::fs;

use tempfile::TempDir;
use weave_core::tree::build::*;
use weave_core::tree::{BinaryOperator, ClassKind, UnaryOperator};
use weave_core::{ConfigLoader, Node, StyleConfig, WeaveError, print, print_until};

fn sample_unit() -> (Node, Node) {
    let counter = variable_decls(
        "\n        ",
        Some(ident("", "int")),
        vec![padded(named_variable(
            " ",
            ident("", "n"),
            Some(left(" ", literal(" ", "0"))),
        ))],
    );
    let repeat = do_while_loop(
        "\n        ",
        padded(block(
            " ",
            vec![padded(unary(
                "\n            ",
                left("", UnaryOperator::PostIncrement),
                ident("", "n"),
            ))],
            "\n        ",
        )),
        left(
            " ",
            parentheses(
                " ",
                padded(binary(
                    "",
                    ident("", "n"),
                    left(" ", BinaryOperator::LessThan),
                    literal(" ", "3"),
                )),
            ),
        ),
    );
    let branch = if_statement(
        "\n        ",
        parentheses(" ", padded(ident("", "done"))),
        padded(block(" ", Vec::new(), "")),
        Some(else_clause(" ", padded(block(" ", Vec::new(), "")))),
    );
    let index = ident("", "n");
    let result = return_statement(
        "\n        // last\n        ",
        Some(array_access(
            " ",
            ident("", "items"),
            array_dimension("", padded(index.clone())),
        )),
    );
    let method = method_decl(
        "\n    ",
        vec![modifier("", "static")],
        Some(ident(" ", "int")),
        ident(" ", "count"),
        container(
            "",
            vec![padded(variable_decls(
                "",
                Some(ident("", "int")),
                vec![padded(named_variable(" ", ident("", "x"), None))],
            ))],
        ),
        Some(block(
            " ",
            vec![padded(counter), padded(repeat), padded(branch), padded(result)],
            "\n    ",
        )),
    );
    let class = class_decl(
        "\n\n",
        vec![modifier("", "public")],
        left(" ", ClassKind::Class),
        ident(" ", "Counter"),
        block(" ", vec![padded(method)], "\n"),
    );
    let unit = compilation_unit(
        Some(padded(package("", ident(" ", "demo")))),
        vec![padded(import(
            "\n",
            field_access("", ident(" ", "java"), left("", ident("", "util"))),
        ))],
        vec![class],
        "\n",
    );
    (unit, index)
}

const SAMPLE_SOURCE: &str = "package demo;
import java.util;

public class Counter {
    static int count(int x) {
        int n = 0;
        do {
            n++;
        } while (n < 3);
        if (done) {} else {}
        // last
        return items[n];
    }
}
";

#[test]
fn test_printer_reproduces_source() {
    let (unit, _) = sample_unit();
    assert_eq!(print(&unit), SAMPLE_SOURCE);
    assert_eq!(unit.to_string(), SAMPLE_SOURCE);
}

#[test]
fn test_print_until_stops_before_target_token() {
    let (unit, index) = sample_unit();
    let printed = print_until(&unit, &index).unwrap();
    assert!(SAMPLE_SOURCE.starts_with(&printed));
    assert!(printed.ends_with("return items["));
}

#[test]
fn test_discovers_style_from_parent_directory() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("weave.yaml"),
        "tabsAndIndents:\n  useTabCharacter: true\n  indentSize: 2\n",
    )
    .unwrap();
    let nested = temp_dir.path().join("src").join("main");
    fs::create_dir_all(&nested).unwrap();

    let config = ConfigLoader::load(None, Some(nested.as_path())).unwrap();
    let style = config.tabs_and_indents();
    assert!(style.use_tab_character);
    assert_eq!(style.indent_size, 2);
    assert_eq!(style.tab_size, 4);
    assert_eq!(style.continuation_indent, 8);
}

#[test]
fn test_toml_style_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(".weaverc.toml");
    fs::write(&path, "[tabsAndIndents]\ncontinuationIndent = 4\n").unwrap();

    let config = ConfigLoader::load(Some(path.as_path()), None).unwrap();
    assert_eq!(config.tabs_and_indents().continuation_indent, 4);
}

#[test]
fn test_invalid_style_file_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("weave.json");
    fs::write(
        &path,
        r#"{"tabsAndIndents": {"useTabCharacter": true, "tabSize": 0}}"#,
    )
    .unwrap();

    let error = ConfigLoader::load(Some(path.as_path()), None).unwrap_err();
    assert!(matches!(error, WeaveError::InvalidStyle { .. }));
}

#[test]
fn test_schema_describes_style_fields() {
    let schema = StyleConfig::json_schema();
    assert!(schema.contains("tabsAndIndents"));
    assert!(schema.contains("continuationIndent"));
}
