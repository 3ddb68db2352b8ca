//! 交互上下文：提问、带标签的提示信息与致命错误输出
//! 输入输出流在构造时注入，测试中可替换为内存缓冲。

use std::io::{self, BufRead, Write};

use crate::error::FatalError;

/// 提示信息中的程序标签：`-- mmgr[INFO] - ...`
const TAG: &str = "mmgr";

/// 持有输入、标准输出、错误输出三个流的交互上下文
pub struct Console<R, W, E> {
    input: R,
    out: W,
    err: E,
}

/// 绑定到进程标准流的交互上下文
pub type StdConsole = Console<io::StdinLock<'static>, io::Stdout, io::Stderr>;

impl StdConsole {
    pub fn stdio() -> Self {
        Console::new(io::stdin().lock(), io::stdout(), io::stderr())
    }
}

impl<R: BufRead, W: Write, E: Write> Console<R, W, E> {
    pub fn new(input: R, out: W, err: E) -> Self {
        Self { input, out, err }
    }

    /// 提问并读取一行回答；空行或输入结束时返回默认值
    pub fn ask(&mut self, question: &str, default: &str) -> io::Result<String> {
        write!(self.out, "!! {} [{}] : ", question, default)?;
        self.out.flush()?;

        let mut line = String::new();
        self.input.read_line(&mut line)?;
        let answer = line.trim_end_matches(['\n', '\r']);
        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer.to_string())
        }
    }

    /// 是/否提问，默认为否
    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let answer = self.ask(question, "")?;
        Ok(is_affirmative(&answer))
    }

    /// 向标准输出写一条 INFO 信息
    pub fn message(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "-- {}[INFO] - {}", TAG, message)
    }

    /// 向错误输出写一条 ERR 信息
    pub fn error(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.err, "-- {}[ERR] - {}", TAG, message)?;
        self.err.flush()
    }

    /// 输出致命错误并原样交还，供调用方继续向上返回
    pub fn crash(&mut self, err: FatalError) -> FatalError {
        self.error(&err.to_string()).ok();
        err
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn errors(&self) -> &E {
        &self.err
    }
}

/// 以 `y` / `Y` 开头即视为肯定回答
pub fn is_affirmative(answer: &str) -> bool {
    answer.starts_with(['y', 'Y'])
}
