//! Document comparison example: text-based, scanned and unreadable inputs
//!
//! Run with `RUST_LOG=debug` to see the comparison stages. An optional
//! argument names a JSON configuration file.

use docdiff_core::{
    CompareConfig, ComparisonEngine, ComparisonOutcome, ExtractionError, InMemoryDocument,
    PageSource,
};

const LINE: &str = "----------------------------------------";

const CONTRACT_V1: [&str; 3] = [
    "This Agreement is made between the Supplier and the Customer. The Supplier shall deliver \
     the goods within thirty days of the order date.",
    "Payment is due within fourteen days of delivery. Late payments accrue interest at two \
     percent per month.",
    "Either party may terminate this Agreement with sixty days written notice.",
];

const CONTRACT_V2: [&str; 3] = [
    "This Agreement is made between the Supplier and the Customer. The Supplier shall deliver \
     the goods within fifteen days of the order date.",
    "Payment is due within fourteen days of delivery. Late payments accrue interest at two \
     percent per month.",
    "Either party may terminate this Agreement with ninety days written notice. Notices must \
     be sent by registered mail.",
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => CompareConfig::from_path(path)?,
        None => CompareConfig::default(),
    };
    let engine = ComparisonEngine::try_new(config)?;

    println!("=== Document Comparison Examples ===\n");

    // Example 1: Two text-based revisions of a contract
    example_text_documents(&engine)?;

    // Example 2: A scanned document needs OCR
    example_scanned_document(&engine);

    // Example 3: Extraction failure
    example_extraction_failure(&engine);

    Ok(())
}

fn example_text_documents(engine: &ComparisonEngine) -> Result<(), Box<dyn std::error::Error>> {
    println!("Example 1: Text-Based Documents");
    println!("{}", LINE);

    let left = InMemoryDocument::from_pages("contract-v1.pdf", CONTRACT_V1);
    let right = InMemoryDocument::from_pages("contract-v2.pdf", CONTRACT_V2);

    match engine.compare_sources(&left, &right)? {
        ComparisonOutcome::Compared(result) => {
            println!("{}", result);

            println!("Sentence diff:");
            for segment in result.sentence_diff().segments() {
                for sentence in segment.value.pieces() {
                    println!("  {:?}: {}", segment.kind, sentence);
                }
            }

            println!("\nJSON:\n{}", result.to_json()?);
        }
        other => println!("Not compared: {}", other.stage()),
    }

    println!();
    Ok(())
}

fn example_scanned_document(engine: &ComparisonEngine) {
    println!("Example 2: Scanned Document");
    println!("{}", LINE);

    let scanned = ["", "", "Page 3"];
    let outcome = engine.compare_named("contract-v1.pdf", CONTRACT_V1, "scan.pdf", scanned);

    if let ComparisonOutcome::OcrRequired(signal) = &outcome {
        for analysis in [&signal.left_analysis, &signal.right_analysis] {
            println!(
                "  {}: {:?}, {} of {} pages with text ({}% confidence)",
                analysis.file_name,
                analysis.file_type,
                analysis.text_pages,
                analysis.total_pages,
                analysis.confidence
            );
        }
        println!("  -> run OCR on the image-based document before comparing");
    }

    println!();
}

/// A source whose extractor cannot open the document
struct EncryptedDocument;

impl PageSource for EncryptedDocument {
    fn name(&self) -> &str {
        "locked.pdf"
    }

    fn page_count(&self) -> Result<usize, ExtractionError> {
        Err(ExtractionError::Encrypted)
    }

    fn page_text(&self, _index: usize) -> Result<String, ExtractionError> {
        Err(ExtractionError::Encrypted)
    }
}

fn example_extraction_failure(engine: &ComparisonEngine) {
    println!("Example 3: Extraction Failure");
    println!("{}", LINE);

    let left = InMemoryDocument::from_pages("contract-v1.pdf", CONTRACT_V1);

    match engine.compare_sources(&left, &EncryptedDocument) {
        Ok(outcome) => println!("  unexpected outcome: {}", outcome.stage()),
        Err(err) => println!("  error: {}", err),
    }

    println!();
}
