//! Domain layer
//! 게시 규칙(글 파싱, 플랫폼 정의, 콘텐츠 변환, 결과 모델)을 외부 의존성 없이 표현한다.

pub mod article;
pub mod markdown;
pub mod platform;
pub mod prompt;
pub mod publish;
