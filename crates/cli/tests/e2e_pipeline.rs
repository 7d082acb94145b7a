//! End-to-end integration tests for the ctxforge toolkit.
//!
//! These exercise the full pipeline in-process: tool definitions packed
//! into context, tools executed through the registry, executions
//! recorded, and feedback folded back into the context.

use ctxforge_context::{ContextPacker, context_metadata};
use ctxforge_core::{Priority, ToolCall};
use ctxforge_feedback::{ContextOptimizer, ExecutionRecord, FeedbackRecorder, Quality};
use ctxforge_tools::{default_registry, definitions_for_context};

#[tokio::test]
async fn pack_execute_record_report() {
    let registry = default_registry();

    // Pack the tool definitions and a task description into context.
    let mut packer = ContextPacker::new(10_000).unwrap();
    packer
        .add("Task", "Review the snippet for obvious problems", Priority::High)
        .unwrap()
        .add("Tool Reference", definitions_for_context(&registry), Priority::Low)
        .unwrap();

    let (context, truncated) = packer.pack();
    assert!(!truncated);
    assert!(context.contains("⭐ ## Task"));
    assert!(context.contains("# Available Tools"));
    // High-priority task comes before the low-priority reference.
    assert!(context.find("## Task").unwrap() < context.find("Tool Reference").unwrap());

    // Execute the analyzer through the registry.
    let call = ToolCall {
        id: "t1".into(),
        name: "analyze_code".into(),
        arguments: serde_json::json!({
            "code": "def add(a, b): return a + b",
            "language": "python",
        }),
    };
    let result = registry.execute(&call).await.unwrap();
    assert!(result.success);
    assert_eq!(result.call_id, "t1");

    // Record the execution and pull a report.
    let recorder = FeedbackRecorder::new();
    recorder.record(ExecutionRecord::new(
        "analyze_code",
        result.success,
        42,
        1_000,
        Quality::Good,
    ));

    let summary = recorder.analyze();
    assert_eq!(summary.total_executions, 1);
    assert!((summary.success_rate - 1.0).abs() < 1e-10);
    assert!(summary.recommendations.is_empty());

    let report = recorder.report();
    assert!(report.contains("Success Rate: 100.0%"));
}

#[tokio::test]
async fn failures_drive_adjustments_into_context() {
    let registry = default_registry();
    let recorder = FeedbackRecorder::new();

    // A read of a missing file comes back unsuccessful but not Err.
    let call = ToolCall {
        id: "t1".into(),
        name: "file_read".into(),
        arguments: serde_json::json!({"path": "/definitely/not/a/real/file"}),
    };
    let result = registry.execute(&call).await.unwrap();
    assert!(!result.success);

    recorder.record(ExecutionRecord::new(
        "file_read",
        result.success,
        3,
        0,
        Quality::Poor,
    ));

    let summary = recorder.analyze();
    assert!(!summary.recommendations.is_empty());

    // High-impact recommendations land in the optimized context.
    let optimizer = ContextOptimizer::new(8_000);
    let optimized = optimizer.optimize("## Task\n\nRead the data file", &summary);
    assert!(optimized.context.contains("## Context Adjustment"));
    assert!(!optimized.applied.is_empty());

    let metadata = context_metadata(&optimized.context);
    assert!(metadata.sections.iter().any(|s| s == "Context Adjustment"));
}

#[tokio::test]
async fn truncation_drops_low_priority_tool_reference() {
    let registry = default_registry();
    let reference = definitions_for_context(&registry);

    // Budget fits the task but not the long tool reference.
    let mut packer = ContextPacker::new(120).unwrap();
    packer
        .add("Task", "Summarize the diff", Priority::High)
        .unwrap()
        .add("Tool Reference", reference, Priority::Low)
        .unwrap();

    let (context, truncated) = packer.pack();
    assert!(truncated);
    assert!(context.contains("## Task"));
    assert!(!context.contains("# Available Tools"));
}

#[tokio::test]
async fn generate_docs_output_feeds_back_into_packer() {
    let registry = default_registry();

    let call = ToolCall {
        id: "d1".into(),
        name: "generate_docs".into(),
        arguments: serde_json::json!({
            "input": "fn truncate(s: &str, n: usize) -> &str",
            "format": "markdown",
        }),
    };
    let result = registry.execute(&call).await.unwrap();
    assert!(result.success);

    // Tool output is opaque text to the packer.
    let mut packer = ContextPacker::new(10_000).unwrap();
    packer
        .add("Generated Docs", result.output, Priority::Medium)
        .unwrap();
    let (context, truncated) = packer.pack();
    assert!(!truncated);
    assert!(context.contains("## Generated Docs"));
    assert!(context.contains("# Generated Documentation"));
}
