use assert_cmd::Command;

#[test]
fn greets() {
    Command::cargo_bin(env!("CARGO_PKG_NAME"))
        .unwrap()
        .args(["--name", "John"])
        .assert()
        .success()
        .stdout("Hello, John!\n");
}
