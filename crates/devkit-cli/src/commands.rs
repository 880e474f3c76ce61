use std::fmt::Write as _;
use std::fs;
use std::io::{self, Read};

use anyhow::{bail, Context};
use chrono::{Datelike, Utc};
use colored::Colorize;
use serde::Serialize;
use serde_json::{json, Value};

use devkit_codec::{
    decode_base64, decode_image, digest, encode_base64, format_file_size, generate_ids,
    generate_people, generate_uuids, Person,
};
use devkit_diff::{
    build_diff_tree, compare, merge_trees, merge_trees_by_path, parse_document, Comparison,
    DiffStatus, DiffTreeNode, Side,
};
use devkit_format::{
    escape_json, format_json, minify_json, parse_stringified_with, FormatReport,
};
use devkit_time::{convert_all, parse_input_time, parse_zone, ZoneTime};

use crate::cli::*;
use crate::config::DevkitConfig;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = DevkitConfig::load_or_default(cli.config.as_deref())?;
    if !config.color {
        colored::control::set_override(false);
    }
    let out = cli.format;

    match cli.command {
        Command::Diff(args) => cmd_diff(args, out),
        Command::Unwrap(args) => {
            let input = read_source(args.file.as_deref())?;
            emit_report(parse_stringified_with(&input, &config.normalizer()).into(), out)
        }
        Command::Fmt(args) => {
            let input = read_source(args.file.as_deref())?;
            let indent = args.indent.unwrap_or(config.indent);
            emit_report(format_json(&input, indent).into(), out)
        }
        Command::Minify(args) => {
            let input = read_source(args.file.as_deref())?;
            emit_report(minify_json(&input).into(), out)
        }
        Command::Escape(args) => {
            let input = read_source(args.file.as_deref())?;
            emit_report(escape_json(&input).into(), out)
        }
        Command::Encode(args) => {
            let encoded = encode_base64(&read_text(args.text)?);
            emit_value(&json!({ "encoded": encoded }), encoded, out)
        }
        Command::Decode(args) => {
            let decoded = decode_base64(read_text(args.text)?.trim())?;
            emit_value(&json!({ "decoded": decoded }), decoded, out)
        }
        Command::Hash(args) => {
            let hex = digest(args.algorithm, &read_text(args.text)?);
            let record = json!({ "algorithm": args.algorithm, "digest": hex });
            emit_value(&record, format!("{}  {}", hex, args.algorithm.to_string().dimmed()), out)
        }
        Command::Image(args) => cmd_image(args, out),
        Command::Uuid(args) => {
            let ids: Vec<String> = generate_uuids(args.count).iter().map(|u| u.to_string()).collect();
            emit_value(&json!(ids), ids.join("\n"), out)
        }
        Command::Time(args) => cmd_time(args, &config, out),
        Command::Id(args) => cmd_id(args, out),
        Command::Person(args) => {
            let people = generate_people(
                &mut rand::thread_rng(),
                args.count,
                args.nationality,
                args.id_type,
                Utc::now().year(),
            );
            let text = people.iter().map(render_person).collect::<Vec<_>>().join("\n");
            emit_value(&serde_json::to_value(&people)?, text, out)
        }
    }
}

fn cmd_diff(args: DiffArgs, out: OutputFormat) -> anyhow::Result<()> {
    let doc_a = parse_document(&read_source(Some(&args.a))?, Side::A)
        .with_context(|| format!("reading {}", args.a))?;
    let doc_b = parse_document(&read_source(Some(&args.b))?, Side::B)
        .with_context(|| format!("reading {}", args.b))?;
    let cmp = compare(&doc_a, &doc_b);

    let tree = args.tree.then(|| {
        let tree_a = build_diff_tree(&cmp.paths_only_in_a, &doc_a, DiffStatus::Removed);
        let tree_b = build_diff_tree(&cmp.paths_only_in_b, &doc_b, DiffStatus::Added);
        if args.deep_merge {
            merge_trees_by_path(&tree_a, &tree_b)
        } else {
            merge_trees(&tree_a, &tree_b)
        }
    });

    match out {
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct DiffOutput<'a> {
                comparison: &'a Comparison,
                #[serde(skip_serializing_if = "Option::is_none")]
                tree: Option<&'a DiffTreeNode>,
            }
            let record = DiffOutput { comparison: &cmp, tree: tree.as_ref() };
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        OutputFormat::Text => {
            print!("{}", render_comparison(&cmp));
            if let Some(tree) = &tree {
                print!("{}", render_tree(tree));
            }
        }
    }
    Ok(())
}

fn cmd_image(args: InputArgs, out: OutputFormat) -> anyhow::Result<()> {
    let input = read_source(args.file.as_deref())?;
    let info = decode_image(input.trim()).context("decoding image")?;
    if matches!(out, OutputFormat::Json) {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }
    println!("Format: {} ({})", info.format.label().bold(), info.mime_type);
    println!("Size:   {}", format_file_size(info.size_in_bytes));
    match info.dimensions {
        Some((w, h)) => println!("Dimensions: {}x{}", w, h),
        None => println!("Dimensions: {}", "unknown".dimmed()),
    }
    Ok(())
}

fn cmd_time(args: TimeArgs, config: &DevkitConfig, out: OutputFormat) -> anyhow::Result<()> {
    let source = parse_zone(args.from.as_deref().unwrap_or(&config.time_zone))?;
    let targets = args
        .to
        .iter()
        .map(|name| parse_zone(name))
        .collect::<Result<Vec<_>, _>>()?;
    let instant = match args.input.as_deref() {
        Some(input) => parse_input_time(input, source)?,
        None => Utc::now(),
    };
    let rows = convert_all(instant, &targets)?;

    let record = json!({ "utc": instant.to_rfc3339(), "zones": rows });
    emit_value(&record, render_zone_times(&rows), out)
}

fn cmd_id(args: IdArgs, out: OutputFormat) -> anyhow::Result<()> {
    let Some(id) = args.validate else {
        let ids = generate_ids(&mut rand::thread_rng(), args.kind, args.count);
        return emit_value(&json!(ids), ids.join("\n"), out);
    };

    let id = id.trim();
    let valid = args.kind.validate(id);
    if matches!(out, OutputFormat::Json) {
        let record = json!({ "kind": args.kind, "id": id, "valid": valid });
        return emit_value(&record, String::new(), out);
    }
    if !valid {
        bail!("{} is not a valid {} number", id, args.kind);
    }
    println!("{} {} is a valid {} number", "✓".green().bold(), id, args.kind);
    Ok(())
}

fn emit_report(report: FormatReport, out: OutputFormat) -> anyhow::Result<()> {
    if matches!(out, OutputFormat::Json) {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    match (report.success, report.formatted, report.error) {
        (true, Some(formatted), _) => {
            if matches!(out, OutputFormat::Text) {
                println!("{}", formatted);
                if let Some(n) = report.iterations {
                    tracing::info!(iterations = n, "normalized");
                }
            }
            Ok(())
        }
        (_, _, Some(error)) => bail!(error),
        _ => bail!("no output produced"),
    }
}

fn emit_value(record: &Value, text: String, out: OutputFormat) -> anyhow::Result<()> {
    match out {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(record)?),
        OutputFormat::Text => println!("{}", text),
    }
    Ok(())
}

/// Read a file, or stdin for `None` / `-`.
fn read_source(source: Option<&str>) -> anyhow::Result<String> {
    match source {
        None | Some("-") => read_stdin(),
        Some(path) => fs::read_to_string(path).with_context(|| format!("reading {}", path)),
    }
}

/// Literal text argument, or stdin for `None` / `-`.
fn read_text(text: Option<String>) -> anyhow::Result<String> {
    match text {
        Some(text) if text != "-" => Ok(text),
        _ => read_stdin(),
    }
}

fn read_stdin() -> anyhow::Result<String> {
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf).context("reading stdin")?;
    Ok(buf)
}

fn show(value: Option<&Value>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "(missing)".to_string(),
    }
}

pub fn render_comparison(cmp: &Comparison) -> String {
    let mut s = String::new();
    let _ = writeln!(
        s,
        "Keys in A: {}  Keys in B: {}",
        cmp.total_keys_a.to_string().bold(),
        cmp.total_keys_b.to_string().bold()
    );
    for path in &cmp.paths_only_in_a {
        let _ = writeln!(s, "  {} {}", "-".red().bold(), path.red());
    }
    for path in &cmp.paths_only_in_b {
        let _ = writeln!(s, "  {} {}", "+".green().bold(), path.green());
    }
    for diff in &cmp.value_diffs {
        let _ = writeln!(
            s,
            "  {} {}: {} → {}",
            "~".yellow().bold(),
            diff.path.yellow(),
            show(diff.value_a.as_ref()),
            show(diff.value_b.as_ref())
        );
    }
    if cmp.is_identical() {
        let _ = writeln!(s, "{} Documents match.", "✓".green().bold());
    } else {
        let _ = writeln!(
            s,
            "{} removed, {} added, {} changed, {} unchanged",
            cmp.removed(),
            cmp.added(),
            cmp.changed(),
            cmp.unchanged()
        );
    }
    s
}

pub fn render_zone_times(rows: &[ZoneTime]) -> String {
    let mut s = String::new();
    for row in rows {
        let label = row.label.map(|l| format!(" ({})", l)).unwrap_or_default();
        let _ = writeln!(
            s,
            "{}{} {}  {}",
            row.zone.bold(),
            label,
            row.offset.dimmed(),
            row.local
        );
    }
    s
}

pub fn render_person(person: &Person) -> String {
    format!(
        "{} | {} | {:?} | {} | {} {} | {} | {}",
        person.english_name.full_name.bold(),
        person.arabic_name.full_name,
        person.gender,
        person.date_of_birth,
        person.id_type,
        person.id_number,
        person.phone_number,
        person.email
    )
}

pub fn render_tree(root: &DiffTreeNode) -> String {
    let mut s = String::new();
    for child in &root.children {
        render_node(child, 0, &mut s);
    }
    s
}

fn render_node(node: &DiffTreeNode, depth: usize, s: &mut String) {
    let indent = "  ".repeat(depth);
    let label = match node.status {
        Some(DiffStatus::Added) => format!("+ {}", node.name).green().to_string(),
        Some(DiffStatus::Removed) => format!("- {}", node.name).red().to_string(),
        Some(DiffStatus::Unchanged) => format!("  {}", node.name),
        None => format!("  {}", node.name).dimmed().to_string(),
    };
    match (&node.value, node.is_leaf()) {
        (Some(value), true) => {
            let _ = writeln!(s, "{}{}: {}", indent, label, value);
        }
        _ => {
            let _ = writeln!(s, "{}{}", indent, label);
        }
    }
    for child in &node.children {
        render_node(child, depth + 1, s);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn renders_comparison_lines() {
        plain();
        let a = json!({"x": 1, "y": {"z": 2}, "gone": true});
        let b = json!({"x": 1, "y": {"z": 3}, "w": 4});
        let out = render_comparison(&compare(&a, &b));

        assert!(out.contains("Keys in A: 4  Keys in B: 4"), "{out}");
        assert!(out.contains("- gone"));
        assert!(out.contains("+ w"));
        assert!(out.contains("~ y.z: 2 → 3"));
        assert!(out.contains("1 removed, 1 added, 2 changed, 1 unchanged"));
    }

    #[test]
    fn renders_identical() {
        plain();
        let a = json!({"k": [1, 2]});
        assert!(render_comparison(&compare(&a, &a)).contains("Documents match."));
    }

    #[test]
    fn renders_tree_with_markers() {
        plain();
        let a = json!({"old": {"v": 1}});
        let b = json!({"new": 2});
        let cmp = compare(&a, &b);
        let tree = merge_trees(
            &build_diff_tree(&cmp.paths_only_in_a, &a, DiffStatus::Removed),
            &build_diff_tree(&cmp.paths_only_in_b, &b, DiffStatus::Added),
        );

        let out = render_tree(&tree);
        assert_eq!(out, "- old\n  - v: 1\n+ new: 2\n");
    }

    #[test]
    fn missing_values_are_labelled() {
        assert_eq!(show(None), "(missing)");
        assert_eq!(show(Some(&json!("s"))), "\"s\"");
    }

    #[test]
    fn report_failure_becomes_error() {
        let err = emit_report(minify_json("{bad").into(), OutputFormat::Text).unwrap_err();
        assert!(err.to_string().starts_with("Invalid JSON: "));
    }

    #[test]
    fn literal_text_is_used_verbatim() {
        assert_eq!(read_text(Some("abc".into())).unwrap(), "abc");
    }

    #[test]
    fn renders_zone_rows() {
        plain();
        let riyadh = parse_zone("Asia/Riyadh").unwrap();
        let instant = parse_input_time("2024-01-15 10:30", riyadh).unwrap();
        let rows = convert_all(instant, &[]).unwrap();
        assert_eq!(
            render_zone_times(&rows),
            "UTC (UTC) +00:00  2024-01-15 07:30:00.000\n\
             Asia/Riyadh (Saudi Arabia) +03:00  2024-01-15 10:30:00.000\n\
             Asia/Colombo (Sri Lanka) +05:30  2024-01-15 13:00:00.000\n"
        );
    }

    #[test]
    fn time_uses_configured_source_zone() {
        let config = DevkitConfig { time_zone: "Mars/Olympus".into(), ..DevkitConfig::default() };
        let args = TimeArgs { input: Some("2024-01-15 10:30".into()), from: None, to: vec![] };
        let err = cmd_time(args, &config, OutputFormat::Json).unwrap_err();
        assert_eq!(err.to_string(), "unknown time zone: Mars/Olympus");
    }

    #[test]
    fn invalid_id_is_an_error() {
        let args = IdArgs {
            kind: devkit_codec::IdKind::NationalId,
            count: 1,
            validate: Some("1000000007".into()),
        };
        let err = cmd_id(args, OutputFormat::Text).unwrap_err();
        assert_eq!(err.to_string(), "1000000007 is not a valid nid number");
    }

    #[test]
    fn renders_person_line() {
        plain();
        let mut rng = <rand::rngs::StdRng as rand::SeedableRng>::seed_from_u64(9);
        let person = devkit_codec::generate_person(
            &mut rng,
            devkit_codec::Nationality::Saudi,
            devkit_codec::IdKind::NationalId,
            2026,
        );
        let line = render_person(&person);
        assert!(line.starts_with(&person.english_name.full_name));
        assert!(line.contains(&format!("nid {}", person.id_number)), "{line}");
        assert!(line.ends_with(&person.email));
    }

    #[test]
    fn diff_reports_the_invalid_side() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("a.json");
        let bad = dir.path().join("b.json");
        fs::write(&good, r#"{"a": [1]}"#).unwrap();
        fs::write(&bad, "{oops").unwrap();

        let args = DiffArgs {
            a: good.to_str().unwrap().into(),
            b: bad.to_str().unwrap().into(),
            tree: false,
            deep_merge: false,
        };
        let err = cmd_diff(args, OutputFormat::Json).unwrap_err();
        let cause = err.root_cause().to_string();
        assert!(cause.starts_with("invalid JSON in document B"), "{cause}");
        assert!(err.to_string().starts_with("reading "));
    }
}
