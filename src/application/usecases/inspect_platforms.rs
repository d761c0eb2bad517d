//! 플랫폼 자격 증명 해석 결과를 확인하는 유스케이스.

use anyhow::Result;

use crate::application::ports::ConfigRepository;

/// 플랫폼별 활성 여부/누락 변수를 사람이 읽기 쉬운 JSON으로 반환한다.
pub struct InspectPlatformsUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
}

impl<'a> InspectPlatformsUseCase<'a> {
    pub fn execute(&self) -> Result<String> {
        self.config_repo.inspect_pretty_json()
    }
}
