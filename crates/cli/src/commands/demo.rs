//! `ctxforge demo` — Run the full context → tools → feedback workflow.

use ctxforge_config::AppConfig;
use ctxforge_context::{ContextPacker, Example};
use ctxforge_core::{Priority, ToolCall};
use ctxforge_feedback::{ContextOptimizer, ExecutionRecord, FeedbackRecorder, Quality};
use ctxforge_tools::{default_registry, definitions_for_context};
use std::time::Instant;

const SAMPLE_CODE: &str = r#"
const todos = [];

function addTodo(title) {
  todos.push({ id: Date.now(), title, completed: false });
}

function removeTodo(id) {
  return todos.filter(t => t.id !== id);
}
"#;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let registry = default_registry();

    println!("╔═══════════════════════════════════════════════╗");
    println!("║       ctxforge — Context Engineering Demo     ║");
    println!("╚═══════════════════════════════════════════════╝\n");

    // ── Demo 1: Tool definitions as context ───────────────────────────
    println!("📚 Demo 1: Understanding Tools");
    println!("────────────────────────────────────────────────\n");

    let tool_context = definitions_for_context(&registry);
    let preview: String = tool_context.chars().take(300).collect();
    println!("{preview}...\n");

    // ── Demo 2: Building context ──────────────────────────────────────
    println!("🏗️  Demo 2: Building Context");
    println!("────────────────────────────────────────────────\n");

    let mut packer = ContextPacker::new(config.context.max_length)?;
    packer
        .add(
            "Project Goal",
            "Build a simple todo application with TypeScript",
            Priority::High,
        )?
        .add(
            "Requirements",
            "- Add/remove todos\n- Mark complete/incomplete\n- Persist to localStorage",
            Priority::High,
        )?
        .add("Tech Stack", "TypeScript, React, Vite", Priority::Medium)?
        .add_examples(&[Example::new(
            "User clicks add button",
            "New todo appears in list",
        )])?
        .add_tools(&registry.definitions())?;

    let (context, truncated) = packer.pack();
    let stats = packer.stats();
    println!("✅ Context built successfully");
    println!("   Sections: {}", stats.fragment_count);
    println!("   Size: {} chars", stats.total_rendered_length);
    println!("   Truncated: {truncated}\n");

    // ── Demo 3: Executing tools ───────────────────────────────────────
    println!("⚙️  Demo 3: Executing Tools");
    println!("────────────────────────────────────────────────\n");

    let recorder = FeedbackRecorder::with_thresholds(
        config.feedback.success_threshold,
        config.feedback.slow_call_ms,
    )?;

    let call = ToolCall {
        id: "demo_1".into(),
        name: "analyze_code".into(),
        arguments: serde_json::json!({
            "code": SAMPLE_CODE,
            "language": "javascript",
        }),
    };

    let started = Instant::now();
    let result = registry.execute(&call).await?;
    let duration_ms = started.elapsed().as_millis() as u64;

    println!("✅ Tool executed successfully");
    for line in result.output.lines() {
        println!("   {line}");
    }
    println!();

    // ── Demo 4: Feedback loop ─────────────────────────────────────────
    println!("📊 Demo 4: Feedback Loop");
    println!("────────────────────────────────────────────────\n");

    let quality = if result.success {
        Quality::Good
    } else {
        Quality::Poor
    };
    recorder.record(ExecutionRecord::new(
        &call.name,
        result.success,
        duration_ms,
        ctxforge_context::token::estimate_tokens(&context) as u64,
        quality,
    ));

    print!("{}", recorder.report());

    // ── Demo 5: Context optimization ──────────────────────────────────
    println!("\n🔄 Demo 5: Context Optimization");
    println!("────────────────────────────────────────────────\n");

    let optimizer = ContextOptimizer::new(config.optimizer.max_tokens);
    let optimized = optimizer.optimize(&context, &recorder.analyze());
    println!("   Tokens used: {}", optimized.tokens_used);
    println!("   Adjustments applied: {}", optimized.applied.len());

    println!("\n✨ Demo complete");
    Ok(())
}
