use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "oraboot")]
#[command(version)]
#[command(about = "Start Oracle instances and listeners after a host reboot", long_about = None)]
pub struct Cli {
    /// 설정 파일 경로 (기본: ~/.oraboot/config.toml)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// oratab 경로 (설정 파일의 oratab_path보다 우선)
    #[arg(long)]
    pub oratab: Option<PathBuf>,

    /// 로그 디렉토리 (설정 파일의 log_dir보다 우선)
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// 지정한 SID만 처리 (여러 번 지정 가능)
    #[arg(short = 's', long = "sid", value_name = "SID")]
    pub sids: Vec<String>,

    /// 상태를 바꾸는 명령은 실행하지 않고 조회만 수행
    #[arg(long)]
    pub dry_run: bool,

    /// 인스턴스/리스너 상태만 보고
    #[arg(long, conflicts_with_all = ["dry_run", "list"])]
    pub status: bool,

    /// 관리 대상 인스턴스와 리스너 목록만 출력
    #[arg(long)]
    pub list: bool,

    /// 실패한 인스턴스/리스너가 있으면 0이 아닌 코드로 종료
    #[arg(long)]
    pub fail_on_error: bool,

    /// 디버그 모드
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// 색상 출력 끄기
    #[arg(long)]
    pub no_color: bool,
}
