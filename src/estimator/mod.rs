//! 주거용/농업용 태양광 설비 용량·비용 추정기 모음.
//! 두 추정기 모두 상태 없는 순수 계산이며 입력 검증은 호출 측이 담당한다.

pub mod agriculture;
pub mod residential;

pub use agriculture::*;
pub use residential::*;
