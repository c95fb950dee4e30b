use std::path::Path;
use std::process::Command;

/// Short commit hash of the workspace, if it is a git checkout
fn git_sha(repo_root: &Path) -> Option<String> {
    let out = Command::new("git")
        .arg("-C")
        .arg(repo_root)
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let sha = String::from_utf8(out.stdout).ok()?.trim().to_string();
    (!sha.is_empty()).then_some(sha)
}

fn main() {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let repo_root = manifest_dir.parent().unwrap_or(manifest_dir);

    println!("cargo:rerun-if-changed=../.git/HEAD");
    let sha = git_sha(repo_root).unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=TALLY_BUILD_SHA={sha}");
}
