//! 콘솔 리포터 포트 구현 어댑터.

use std::io::{self, IsTerminal, Write};
use std::sync::Mutex;

use crate::application::ports::Reporter;

const RULE_WIDTH: usize = 48;

/// 게시 진행 상황을 stdout에 출력한다.
///
/// TTY에서는 `publishing` 상태를 한 줄에 덮어쓰고, 결과가 나오면 그 줄을
/// 최종 상태로 바꾼다. 파이프로 연결되면 모든 상태를 줄 단위로 남긴다.
pub struct ConsoleReporter {
    interactive: bool,
    /// 덮어쓸 진행 줄이 화면에 남아 있는 플랫폼
    pending: Mutex<Option<String>>,
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self {
            interactive: io::stdout().is_terminal(),
            pending: Mutex::new(None),
        }
    }

    fn clear_pending(&self) {
        if let Ok(mut pending) = self.pending.lock()
            && pending.take().is_some()
        {
            print!("\r\x1b[2K");
        }
    }
}

impl Reporter for ConsoleReporter {
    fn section(&self, name: &str) {
        self.clear_pending();
        let pad = RULE_WIDTH.saturating_sub(name.chars().count() + 2) / 2;
        println!();
        println!("{} {name} {}", "─".repeat(pad), "─".repeat(pad));
    }

    fn kv(&self, key: &str, value: &str) {
        println!("{key:>8}: {value}");
    }

    fn status(&self, scope: &str, message: &str) {
        self.clear_pending();
        println!("[{scope}] {message}");
    }

    fn platform_status(&self, platform: &str, status: &str, extra: Option<&str>) {
        if self.interactive && status == "publishing" {
            print!("\r\x1b[2K  {} {platform} ...", status_mark(status));
            let _ = io::stdout().flush();
            if let Ok(mut pending) = self.pending.lock() {
                *pending = Some(platform.to_string());
            }
            return;
        }

        self.clear_pending();
        let label = if self.interactive {
            colorize_status(status)
        } else {
            status.to_string()
        };
        match extra {
            Some(extra) => println!("  {} {platform}: {label} {extra}", status_mark(status)),
            None => println!("  {} {platform}: {label}", status_mark(status)),
        }
    }

    fn raw(&self, line: &str) {
        self.clear_pending();
        println!("{line}");
    }
}

/// 라이브러리 직접 호출과 `--json` 출력에서 쓰는 무출력 리포터.
pub struct QuietReporter;

impl Reporter for QuietReporter {
    fn section(&self, _name: &str) {}
    fn kv(&self, _key: &str, _value: &str) {}
    fn status(&self, _scope: &str, _message: &str) {}
    fn platform_status(&self, _platform: &str, _status: &str, _extra: Option<&str>) {}
    fn raw(&self, _line: &str) {}
}

fn status_mark(status: &str) -> &'static str {
    match status {
        "publishing" => "…",
        "done" => "✓",
        "manual" => "✎",
        "failed" => "✗",
        _ => "·",
    }
}

fn colorize_status(status: &str) -> String {
    let code = match status {
        "done" => "32",
        "manual" => "36",
        "failed" => "31",
        _ => return status.to_string(),
    };
    format!("\x1b[{code}m{status}\x1b[0m")
}
