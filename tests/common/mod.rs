use assert_cmd::Command;

pub fn postpage_cmd() -> Command {
    let mut cmd = Command::cargo_bin("postpage").unwrap();
    cmd.env_remove("POSTPAGE_POSTS");
    cmd.env_remove("POSTPAGE_OUT");
    cmd.env_remove("POSTPAGE_TEMPLATES");
    cmd.env_remove("RUST_LOG");
    cmd
}
