//! `ctxforge analyze` — Run the heuristic code scanner on a file.

use ctxforge_analyzer::{Aspect, Language, analyze, analyze_with_proof};

pub fn run(
    file: &str,
    language: &str,
    aspects: &[String],
    proof: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let code = std::fs::read_to_string(file)
        .map_err(|e| format!("Failed to read {file}: {e}"))?;
    let language: Language = language.parse()?;
    let aspects: Vec<Aspect> = aspects
        .iter()
        .map(|a| a.parse())
        .collect::<Result<_, _>>()?;

    let analysis = match proof {
        Some(issue) => analyze_with_proof(&code, language, &aspects, issue)?,
        None => analyze(&code, language, &aspects)?,
    };

    println!("📋 Analysis of {file}");
    println!("  Language:    {}", analysis.language);
    println!("  Complexity:  {}", analysis.complexity);

    if analysis.issues.is_empty() {
        println!("  Issues:      none");
    } else {
        println!("  Issues:");
        for issue in &analysis.issues {
            println!("    - {issue}");
        }
    }

    println!("  Suggestions:");
    for suggestion in &analysis.suggestions {
        println!("    - {suggestion}");
    }

    if let Some(proof) = &analysis.proof_steps {
        println!("\n🧪 {}", proof.description);
        for (i, test) in proof.generated_tests.iter().enumerate() {
            println!("\n--- Test {} ---", i + 1);
            println!("{test}");
        }
    }

    Ok(())
}
