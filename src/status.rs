use std::fmt;

/// 인스턴스 상태 (`v$instance.status`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceStatus {
    /// nomount 상태
    Started,
    /// 컨트롤 파일까지 열린 상태
    Mounted,
    /// 읽기/쓰기 가능 상태
    Open,
    /// 응답을 해석할 수 없음
    Unknown,
}

impl InstanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstanceStatus::Started => "STARTED",
            InstanceStatus::Mounted => "MOUNTED",
            InstanceStatus::Open => "OPEN",
            InstanceStatus::Unknown => "UNKNOWN",
        }
    }

    /// 조회 결과 문자열을 상태로 변환 (모르는 값은 Unknown)
    pub fn from_value(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "STARTED" => InstanceStatus::Started,
            "MOUNTED" => InstanceStatus::Mounted,
            "OPEN" => InstanceStatus::Open,
            _ => InstanceStatus::Unknown,
        }
    }

    /// mount 이후 단계로 진행할 수 있는 상태인지
    pub fn is_mounted_or_open(&self) -> bool {
        matches!(self, InstanceStatus::Mounted | InstanceStatus::Open)
    }
}

/// 데이터베이스 역할 (`v$database.database_role`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseRole {
    Primary,
    LogicalStandby,
    PhysicalStandby,
    Unknown,
}

impl DatabaseRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseRole::Primary => "PRIMARY",
            DatabaseRole::LogicalStandby => "LOGICAL STANDBY",
            DatabaseRole::PhysicalStandby => "PHYSICAL STANDBY",
            DatabaseRole::Unknown => "UNKNOWN",
        }
    }

    pub fn from_value(s: &str) -> Self {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ");
        match normalized.to_uppercase().as_str() {
            "PRIMARY" => DatabaseRole::Primary,
            "LOGICAL STANDBY" => DatabaseRole::LogicalStandby,
            "PHYSICAL STANDBY" => DatabaseRole::PhysicalStandby,
            _ => DatabaseRole::Unknown,
        }
    }
}

/// Managed recovery 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryStatus {
    Active,
    Inactive,
}

impl RecoveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecoveryStatus::Active => "ACTIVE",
            RecoveryStatus::Inactive => "INACTIVE",
        }
    }
}

/// 리스너 상태 (OS 프로세스 존재 여부)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerStatus {
    Active,
    Inactive,
}

impl ListenerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListenerStatus::Active => "ACTIVE",
            ListenerStatus::Inactive => "INACTIVE",
        }
    }

    /// 정확히 하나의 프로세스가 있을 때만 Active
    pub fn from_match_count(count: usize) -> Self {
        if count == 1 {
            ListenerStatus::Active
        } else {
            ListenerStatus::Inactive
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

display_as_str!(InstanceStatus, DatabaseRole, RecoveryStatus, ListenerStatus);
