//! CLI 인터페이스 모듈 묶음.
//! 입력 파싱/출력 형식/명령 실행을 한 네임스페이스로 관리한다.

pub mod command;
pub mod output;
pub mod runner;

pub use command::{Cli, CliAction};
pub use runner::run;
