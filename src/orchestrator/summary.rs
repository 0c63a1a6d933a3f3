use crate::status::{DatabaseRole, InstanceStatus, ListenerStatus, RecoveryStatus};

/// 인스턴스 처리 결과
#[derive(Debug, Clone)]
pub struct InstanceResult {
    pub sid: String,
    /// 마지막으로 조회한 상태
    pub status: InstanceStatus,
    /// mount에 성공했을 때만 조회됨
    pub role: Option<DatabaseRole>,
    /// physical standby일 때만 조회됨
    pub recovery: Option<RecoveryStatus>,
    pub success: bool,
    pub message: String,
}

impl InstanceResult {
    pub fn new(sid: &str) -> Self {
        Self {
            sid: sid.to_string(),
            status: InstanceStatus::Unknown,
            role: None,
            recovery: None,
            success: false,
            message: String::new(),
        }
    }

    /// "OPEN, PRIMARY" / "MOUNTED, PHYSICAL STANDBY, recovery ACTIVE"
    pub fn describe_state(&self) -> String {
        let mut parts = vec![self.status.to_string()];
        if let Some(role) = self.role {
            parts.push(role.to_string());
        }
        if let Some(recovery) = self.recovery {
            parts.push(format!("recovery {}", recovery));
        }
        parts.join(", ")
    }
}

/// 리스너 처리 결과
#[derive(Debug, Clone)]
pub struct ListenerResult {
    pub sid: String,
    pub name: String,
    pub status: ListenerStatus,
    /// 같은 listener.ora에서 이미 처리되어 건너뜀
    pub skipped: bool,
}

impl ListenerResult {
    pub fn new(sid: &str, name: &str, status: ListenerStatus) -> Self {
        Self {
            sid: sid.to_string(),
            name: name.to_string(),
            status,
            skipped: false,
        }
    }

    pub fn skipped(sid: &str, name: &str) -> Self {
        Self {
            skipped: true,
            ..Self::new(sid, name, ListenerStatus::Inactive)
        }
    }

    pub fn success(&self) -> bool {
        self.skipped || self.status == ListenerStatus::Active
    }
}

/// 한 번의 실행 결과
#[derive(Debug, Default)]
pub struct RunSummary {
    pub instances: Vec<InstanceResult>,
    pub listeners: Vec<ListenerResult>,
    /// 전체 실행 시간 (밀리초)
    pub total_duration_ms: u128,
}

impl RunSummary {
    /// 건너뛴 리스너를 제외한 처리 단위 수
    pub fn total(&self) -> usize {
        self.instances.len() + self.listeners.iter().filter(|l| !l.skipped).count()
    }

    pub fn failure_count(&self) -> usize {
        self.failed_instances().len() + self.failed_listeners().len()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failure_count() == 0
    }

    pub fn failed_instances(&self) -> Vec<&InstanceResult> {
        self.instances.iter().filter(|r| !r.success).collect()
    }

    pub fn failed_listeners(&self) -> Vec<&ListenerResult> {
        self.listeners.iter().filter(|l| !l.success()).collect()
    }
}
