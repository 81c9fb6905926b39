use std::fs;
use std::path::Path;

/// placeholder macros that must not ship
const PLACEHOLDER_MACROS: [&str; 2] = ["todo!(", "unimplemented!("];

#[test]
fn no_todo_markers() {
    let mut findings = Vec::new();

    let src_dir = Path::new("src");
    if src_dir.exists() {
        search_dir(src_dir, &mut findings);
    }

    if !findings.is_empty() {
        eprintln!("\nfound {} leftover marker(s):", findings.len());
        for (file, line_num, line) in &findings {
            eprintln!("  {}:{}: {}", file, line_num, line.trim());
        }
        panic!("todo markers must be removed before tests pass");
    }
}

fn search_dir(dir: &Path, findings: &mut Vec<(String, usize, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            search_dir(&path, findings);
        } else if path.extension().and_then(|s| s.to_str()) == Some("rs") {
            search_file(&path, findings);
        }
    }
}

fn search_file(path: &Path, findings: &mut Vec<(String, usize, String)>) {
    let Ok(content) = fs::read_to_string(path) else {
        return;
    };
    for (line_num, line) in content.lines().enumerate() {
        if is_todo_in_comment(line) || has_placeholder_macro(line) {
            findings.push((path.display().to_string(), line_num + 1, line.to_string()));
        }
    }
}

fn has_placeholder_macro(line: &str) -> bool {
    let code = line.split("//").next().unwrap_or("");
    PLACEHOLDER_MACROS.iter().any(|m| code.contains(m))
}

fn is_todo_in_comment(line: &str) -> bool {
    let line_upper = line.to_uppercase();

    // line and block comments
    for marker in ["//", "/*"] {
        if let Some(pos) = line.find(marker)
            && line_upper[pos..].contains("TODO")
        {
            return true;
        }
    }

    // block comment continuation lines
    let trimmed = line.trim_start();
    trimmed.starts_with('*') && !trimmed.starts_with("*/") && line_upper.contains("TODO")
}
