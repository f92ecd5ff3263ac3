//! practrack 도메인 모델.
//!
//! 서버-클라이언트 간 공유하는 핵심 데이터 구조체를 정의한다.
//! 서버와 주고받는 모델은 `serde` Serialize/Deserialize를 구현한다.

pub mod course;
pub mod session;
pub mod time_entry;
pub mod timer;
