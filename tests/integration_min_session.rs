// Drives the compiled binary through a PTY so the real event loop and
// crossterm input handling run end to end.
//
// Needs a pseudo terminal, so it is Unix-only and ignored by default.
// Run with: `cargo test --test integration_min_session -- --ignored`.

#![cfg(unix)]

use std::time::Duration;

use expectrl::{spawn, Eof};

#[test]
#[ignore]
fn answer_one_question_then_quit() -> Result<(), Box<dyn std::error::Error>> {
    let bin = assert_cmd::cargo::cargo_bin("hiragana-quiz");
    let cmd = format!(
        "{} --no-backdrop --config /nonexistent/hiragana-quiz.json",
        bin.display()
    );

    let mut p = spawn(cmd)?;
    std::thread::sleep(Duration::from_millis(200));

    // start the round and answer whatever shows up
    p.send("\r")?;
    std::thread::sleep(Duration::from_millis(100));
    p.send("ka\r")?;
    std::thread::sleep(Duration::from_millis(200));

    // stop back to the menu, then leave
    p.send("\x1b")?;
    std::thread::sleep(Duration::from_millis(100));
    p.send("\x1b")?;

    p.expect(Eof)?;
    Ok(())
}
