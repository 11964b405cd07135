//! Read-only block renderer for document content.
//!
//! Content is stored as a JSON array of blocks (`type`, `props`, inline
//! `content`, nested `children`). Anything that does not parse that way is
//! shown as plain text, one paragraph per line. There is no write path here.

use leptos::prelude::*;
use serde::Deserialize;
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Block {
    Heading { level: u8, text: String },
    Paragraph(String),
    Bullet(String),
    Numbered(String),
    Check { checked: bool, text: String },
    Quote(String),
    Code(String),
}

#[derive(Deserialize)]
struct RawBlock {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    props: Value,
    #[serde(default)]
    content: Value,
    #[serde(default)]
    children: Vec<RawBlock>,
}

/// Concatenates inline text runs. Links contribute their own inline content.
fn inline_text(content: &Value) -> String {
    match content {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item.get("type").and_then(Value::as_str) {
                Some("link") => item.get("content").map(inline_text).unwrap_or_default(),
                _ => item
                    .get("text")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            })
            .collect(),
        _ => String::new(),
    }
}

fn flatten(raw: Vec<RawBlock>, out: &mut Vec<Block>) {
    for b in raw {
        let text = inline_text(&b.content);
        let block = match b.kind.as_str() {
            "heading" => Block::Heading {
                level: b
                    .props
                    .get("level")
                    .and_then(Value::as_u64)
                    .map_or(1, |l| l.clamp(1, 3) as u8),
                text,
            },
            "bulletListItem" => Block::Bullet(text),
            "numberedListItem" => Block::Numbered(text),
            "checkListItem" => Block::Check {
                checked: b
                    .props
                    .get("checked")
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
                text,
            },
            "quote" => Block::Quote(text),
            "codeBlock" => Block::Code(text),
            _ => Block::Paragraph(text),
        };
        out.push(block);
        flatten(b.children, out);
    }
}

pub(crate) fn blocks_from_content(content: Option<&str>) -> Vec<Block> {
    let Some(content) = content.map(str::trim).filter(|c| !c.is_empty()) else {
        return vec![];
    };

    match serde_json::from_str::<Vec<RawBlock>>(content) {
        Ok(raw) => {
            let mut blocks = Vec::new();
            flatten(raw, &mut blocks);
            // Trailing empty paragraphs are editor padding.
            while matches!(blocks.last(), Some(Block::Paragraph(t)) if t.is_empty()) {
                blocks.pop();
            }
            blocks
        }
        Err(_) => content
            .lines()
            .map(|line| Block::Paragraph(line.to_string()))
            .collect(),
    }
}

fn render_block(block: Block, ordinal: usize) -> AnyView {
    match block {
        Block::Heading { level: 1, text } => {
            view! { <h1 class="mt-4 text-3xl font-bold">{text}</h1> }.into_any()
        }
        Block::Heading { level: 2, text } => {
            view! { <h2 class="mt-3 text-2xl font-semibold">{text}</h2> }.into_any()
        }
        Block::Heading { text, .. } => {
            view! { <h3 class="mt-2 text-xl font-semibold">{text}</h3> }.into_any()
        }
        Block::Paragraph(text) => view! { <p class="min-h-6 leading-7">{text}</p> }.into_any(),
        Block::Bullet(text) => view! {
            <div class="flex gap-2 leading-7">
                <span class="select-none text-muted-foreground">"•"</span>
                <span>{text}</span>
            </div>
        }
        .into_any(),
        Block::Numbered(text) => view! {
            <div class="flex gap-2 leading-7">
                <span class="select-none text-muted-foreground">{format!("{ordinal}.")}</span>
                <span>{text}</span>
            </div>
        }
        .into_any(),
        Block::Check { checked, text } => view! {
            <label class="flex items-center gap-2 leading-7">
                <input type="checkbox" checked=checked disabled=true />
                <span class:line-through=checked>{text}</span>
            </label>
        }
        .into_any(),
        Block::Quote(text) => view! {
            <blockquote class="border-l-2 pl-3 italic text-muted-foreground">{text}</blockquote>
        }
        .into_any(),
        Block::Code(text) => view! {
            <pre class="overflow-x-auto rounded-md bg-muted p-3 text-sm"><code>{text}</code></pre>
        }
        .into_any(),
    }
}

#[component]
pub(crate) fn ReadOnlyEditor(content: Option<String>) -> impl IntoView {
    let blocks = blocks_from_content(content.as_deref());

    // Numbered items count up within each consecutive run.
    let mut run = 0;
    let rendered = blocks
        .into_iter()
        .map(|block| {
            run = if matches!(block, Block::Numbered(_)) { run + 1 } else { 0 };
            render_block(block, run)
        })
        .collect_view();

    view! {
        <div data-name="ReadOnlyEditor" class="flex flex-col gap-1 pl-[54px] pr-4" aria-readonly="true">
            {rendered}
        </div>
    }
}
