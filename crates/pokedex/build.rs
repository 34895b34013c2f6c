use std::process::Command;

fn git(args: &[&str]) -> String {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");

    let hash = git(&["rev-parse", "--short", "HEAD"]);
    let version = env!("CARGO_PKG_VERSION");
    let is_release = git(&["tag", "--points-at", "HEAD"])
        .lines()
        .any(|tag| tag == format!("v{}", version) || tag == version);

    println!("cargo:rustc-env=GIT_HASH={}", hash);
    println!("cargo:rustc-env=IS_RELEASE={}", is_release);
}
