use std::path::{Path, PathBuf};
use std::process::Command;

/// Trimmed stdout of a git command run in `repo`, if it succeeded with output.
fn git_stdout(repo: &Path, args: &[&str]) -> Option<String> {
    let out = Command::new("git").arg("-C").arg(repo).args(args).output().ok()?;
    if !out.status.success() {
        return None;
    }
    let text = String::from_utf8(out.stdout).ok()?.trim().to_string();
    (!text.is_empty()).then_some(text)
}

fn main() {
    let workspace = std::env::var_os("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .and_then(|dir| dir.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from(".."));

    let sha = git_stdout(&workspace, &["rev-parse", "--short", "HEAD"]);
    println!("cargo:rustc-env=BUDGET_BUILD_SHA={}", sha.as_deref().unwrap_or("unknown"));

    // HEAD only moves on checkout; the branch ref moves on every commit
    println!("cargo:rerun-if-changed={}", workspace.join(".git/HEAD").display());
    if let Some(head_ref) = git_stdout(&workspace, &["symbolic-ref", "-q", "HEAD"]) {
        println!("cargo:rerun-if-changed={}", workspace.join(".git").join(head_ref).display());
    }
}
