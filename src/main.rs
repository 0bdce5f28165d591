use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use student_registration::models::{Field, FormInput};
use student_registration::utils::logging;
use student_registration::{App, Config};

#[derive(Parser)]
#[command(name = "student-registration")]
#[command(version)]
#[command(about = "Student registration form backed by a spreadsheet webhook", long_about = None)]
struct Cli {
    /// TOML 配置文件路径（默认读取 REGISTRATION_CONFIG）
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 填写并提交报名表（不带参数时进入交互模式）
    Register {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        number: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        grade: Option<String>,
        #[arg(long)]
        center: Option<String>,
    },
    /// 列出某个年级可选的教学点
    Centers {
        #[arg(value_name = "GRADE")]
        grade: String,
    },
    /// 检查配置是否可用
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let config = Config::load(cli.config.as_deref())?;

    // 初始化日志
    logging::init(config.verbose_logging);

    let mut app = App::initialize(config);

    match cli.command {
        Command::Register {
            name,
            number,
            phone,
            grade,
            center,
        } => {
            let flags = [
                (Field::StudentName, name),
                (Field::StudentNumber, number),
                (Field::ParentPhone, phone),
                (Field::GradeLevel, grade),
                (Field::Center, center),
            ];
            if flags.iter().all(|(_, value)| value.is_none()) {
                app.run_interactive().await?;
            } else {
                let input = flags
                    .into_iter()
                    .fold(FormInput::default(), |input, (field, value)| {
                        input.with(field, value.unwrap_or_default())
                    });
                app.run_once(input).await?;
            }
        }
        Command::Centers { grade } => app.print_centers(&grade)?,
        Command::CheckConfig => app.check_config()?,
    }

    Ok(())
}
