use gold_candle_plan::market::MarketSession;
use gold_candle_plan::strategy::{PlanConfig, build_daily_plan};
use gold_candle_plan::{ConfigFormat, ConfigLoader};
use log::{debug, error, info, warn};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    // 로그 초기화
    env_logger::init();

    info!("일일 플랜 생성 시작");

    let args: Vec<String> = env::args().skip(1).collect();
    debug!("커맨드 라인 인수: {:?}", args);

    let as_json = args.iter().any(|arg| arg == "--json");
    let config_arg = args.iter().find(|arg| !arg.starts_with("--"));

    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        println!("사용법: daily_plan [설정_파일_경로] [--json]");
        println!("설정 파일이 없으면 기본 설정(xauusd, 1년, 3일 패턴)을 사용합니다.");
        return ExitCode::SUCCESS;
    }

    // 설정 파일 경로 (지정되지 않은 경우 기본 경로 사용)
    let config_path = match config_arg {
        Some(path) => {
            debug!("사용자 지정 설정 파일 사용: {}", path);
            PathBuf::from(path)
        }
        None => PlanConfig::default_config_path(),
    };

    let config = if config_path.exists() {
        match ConfigLoader::load_from_file::<PlanConfig>(&config_path, ConfigFormat::Auto) {
            Ok(config) => config,
            Err(err) => {
                error!("설정 로드 실패: {}", err);
                eprintln!("설정 로드 실패: {}", err);
                return ExitCode::FAILURE;
            }
        }
    } else {
        if config_arg.is_some() {
            error!("설정 파일이 존재하지 않습니다: {}", config_path.display());
            eprintln!("설정 파일이 존재하지 않습니다: {}", config_path.display());
            return ExitCode::FAILURE;
        }
        warn!(
            "설정 파일이 없어 기본 설정 사용: {}",
            config_path.display()
        );
        PlanConfig::default()
    };

    info!("설정: {}", config);

    let mut session = MarketSession::new(&config.data_dir);
    session.set_market(config.market);

    let store = match session.series() {
        Ok(store) => store,
        Err(err) => {
            error!("시세 데이터 로드 실패: {}", err);
            eprintln!("시세 데이터 로드 실패: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let plan = match build_daily_plan(config.market, store.items(), &config) {
        Ok(plan) => plan,
        Err(err) => {
            error!("플랜 계산 실패: {}", err);
            eprintln!("플랜 계산 실패: {}", err);
            return ExitCode::FAILURE;
        }
    };

    if as_json {
        match serde_json::to_string_pretty(&plan) {
            Ok(json) => println!("{}", json),
            Err(err) => {
                error!("JSON 직렬화 실패: {}", err);
                eprintln!("JSON 직렬화 실패: {}", err);
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("{}", plan);
    }

    info!("일일 플랜 생성 종료");
    ExitCode::SUCCESS
}
