use crate::clients::{QuestionApi, QuestionClient};
use crate::components::{Confirm, Dashboard, DeleteOutcome, FormField, SubmitOutcome};
use crate::config::Config;
use crate::render;
use crate::utils::logging::log_startup;
use anyhow::Result;
use std::io::{BufRead, Stdout, StdinLock, Write};
use std::sync::Arc;
use tracing::{info, warn};

const HELP: &str = "\
命令:
  add                       切换到 Add Question
  list                      切换到 Manage Questions
  show                      重新显示当前视图
  set <field> <value>       编辑字段 (branch | test | text | answer | explanation | difficulty)
  option <1-4> <text>       编辑选项
  submit                    保存草稿
  edit <n>                  编辑列表中第 n 道题
  delete <n>                删除列表中第 n 道题
  help                      显示帮助
  quit                      退出";

/// 控制台命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add,
    List,
    Show,
    Set(FormField, String),
    Option(usize, String),
    Submit,
    Edit(usize),
    Delete(usize),
    Help,
    Quit,
}

impl Command {
    /// 解析一行输入；编号均从 1 开始
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match name {
            "add" => Ok(Command::Add),
            "list" => Ok(Command::List),
            "show" | "" => Ok(Command::Show),
            "submit" => Ok(Command::Submit),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            "set" => {
                let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                Ok(Command::Set(field.parse()?, value.trim().to_string()))
            }
            "option" => {
                let (number, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                Ok(Command::Option(parse_number(number)?, value.trim().to_string()))
            }
            "edit" => Ok(Command::Edit(parse_number(rest)?)),
            "delete" => Ok(Command::Delete(parse_number(rest)?)),
            other => Err(format!("未知命令: {other}（输入 help 查看帮助）")),
        }
    }
}

fn parse_number(input: &str) -> Result<usize, String> {
    match input.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("无效编号: '{input}'（从 1 开始）")),
    }
}

/// 控制台输入输出，同时负责删除前的确认
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// 读取一行；None 表示输入结束
    fn read_line(&mut self) -> std::io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Confirm for Terminal<R, W> {
    fn confirm(&mut self, prompt: &str) -> bool {
        let _ = write!(self.output, "{prompt} [y/N] ");
        let _ = self.output.flush();
        match self.read_line() {
            Ok(Some(answer)) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            _ => false,
        }
    }
}

/// 应用主结构
pub struct App<R, W> {
    dashboard: Dashboard,
    terminal: Terminal<R, W>,
}

impl App<StdinLock<'static>, Stdout> {
    /// 初始化应用：连接标准输入输出
    pub fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);
        let client = QuestionClient::new(&config)?;
        Ok(Self::new(
            Arc::new(client),
            Terminal::new(std::io::stdin().lock(), std::io::stdout()),
        ))
    }
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(api: Arc<dyn QuestionApi>, terminal: Terminal<R, W>) -> Self {
        Self {
            dashboard: Dashboard::new(api),
            terminal,
        }
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn dashboard_mut(&mut self) -> &mut Dashboard {
        &mut self.dashboard
    }

    pub fn into_output(self) -> W {
        self.terminal.into_output()
    }

    /// 运行主循环，直到 quit 或输入结束
    pub async fn run(&mut self) -> Result<()> {
        writeln!(self.terminal.output, "{HELP}\n")?;
        loop {
            write!(self.terminal.output, "{}", render::render_dashboard(&self.dashboard))?;
            write!(self.terminal.output, "> ")?;
            self.terminal.output.flush()?;

            let Some(line) = self.terminal.read_line()? else {
                info!("输入结束，退出");
                break;
            };

            let command = match Command::parse(&line) {
                Ok(command) => command,
                Err(msg) => {
                    writeln!(self.terminal.output, "⚠️ {msg}")?;
                    continue;
                }
            };

            if command == Command::Quit {
                info!("👋 退出");
                break;
            }
            if let Err(e) = self.execute(command).await {
                warn!("命令执行失败: {}", e);
                writeln!(self.terminal.output, "⚠️ {e}")?;
            }
        }
        Ok(())
    }

    /// 执行单条命令
    pub async fn execute(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Add => self.dashboard.select_add(),
            Command::List => {
                self.dashboard.select_list().await?;
            }
            Command::Show | Command::Quit => {}
            Command::Help => writeln!(self.terminal.output, "{HELP}")?,
            Command::Set(field, value) => {
                self.form_mut()?.set_field(field, &value)?;
            }
            Command::Option(index, value) => {
                self.form_mut()?.set_option(index, value)?;
            }
            Command::Submit => match self.dashboard.submit().await? {
                Some(SubmitOutcome::Created(q)) => {
                    writeln!(self.terminal.output, "✓ Created question {}", q.id.unwrap_or_default())?
                }
                Some(SubmitOutcome::Updated(q)) => {
                    writeln!(self.terminal.output, "✓ Updated question {}", q.id.unwrap_or_default())?
                }
                Some(SubmitOutcome::Busy) => writeln!(self.terminal.output, "⏳ Saving...")?,
                None => anyhow::bail!("当前不在表单视图（输入 add 切换）"),
            },
            Command::Edit(index) => {
                if !self.dashboard.state().is_list() {
                    anyhow::bail!("当前不在列表视图（输入 list 切换）");
                }
                if self.dashboard.edit(index).is_none() {
                    anyhow::bail!("列表中没有第 {} 道题", index + 1);
                }
            }
            Command::Delete(index) => match self.dashboard.delete(index, &mut self.terminal).await? {
                Some(DeleteOutcome::Deleted(_)) => writeln!(self.terminal.output, "✓ Deleted")?,
                Some(DeleteOutcome::Declined) => writeln!(self.terminal.output, "已取消")?,
                Some(DeleteOutcome::NoId) => writeln!(self.terminal.output, "该题目没有 id，无法删除")?,
                None => anyhow::bail!("列表中没有第 {} 道题", index + 1),
            },
        }
        Ok(())
    }

    fn form_mut(&mut self) -> Result<&mut crate::components::QuestionForm> {
        self.dashboard
            .form_mut()
            .ok_or_else(|| anyhow::anyhow!("当前不在表单视图（输入 add 切换）"))
    }
}
