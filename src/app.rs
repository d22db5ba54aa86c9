use std::fs;
use std::path::PathBuf;

use color_eyre::Result;
use serde_json::Value;

use crate::args::Options;
use crate::loader;
use crate::normalize;
use crate::render;

#[derive(Debug)]
pub struct App {
    input: PathBuf,
    output: PathBuf,
}

impl App {
    pub fn new(args: Options) -> Self {
        Self {
            input: args.input,
            output: args.output,
        }
    }

    pub fn run(&self) -> Result<()> {
        let backup = loader::load_backup(&self.input)?;

        let sites = backup
            .pointer("/data/site/sites")
            .and_then(Value::as_array)
            .filter(|cols| !cols.is_empty());
        let Some(sites) = sites else {
            // Missing bookmark data is a clean exit, not a crash.
            println!(
                "⚠️ 未找到有效的书签数据，请检查 {} 文件结构",
                self.input.display()
            );
            return Ok(());
        };

        let extraction = normalize::extract_columns(sites);
        if extraction.dropped > 0 {
            eprintln!("⚠️ 已跳过 {} 条无法识别的记录", extraction.dropped);
        }

        let html = render::render_html(&extraction.columns, render::DEFAULT_TITLE);
        fs::write(&self.output, &html)?;

        let shown = self
            .output
            .canonicalize()
            .unwrap_or_else(|_| self.output.clone());
        println!("✅ 书签导航页面已成功生成: {}", shown.display());
        println!("请打开该文件查看效果");
        Ok(())
    }
}
