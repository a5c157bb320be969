//! End-to-end behavior of the copy pipeline against mock collaborators.

mod common;

use common::{MockCaptioner, MockGenerator, MockRecognizer, product_image};
use prodscribe::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;

struct Harness {
    recognizer: Arc<MockRecognizer>,
    captioner: Arc<MockCaptioner>,
    generator: Arc<MockGenerator>,
    pipeline: CopyPipeline,
}

fn harness_with(
    recognizer: MockRecognizer,
    captioner: MockCaptioner,
    generator: MockGenerator,
    config: PipelineConfig,
) -> Harness {
    let recognizer = Arc::new(recognizer);
    let captioner = Arc::new(captioner);
    let generator = Arc::new(generator);
    let pipeline = CopyPipelineBuilder::new()
        .recognizer(recognizer.clone())
        .captioner(captioner.clone())
        .tagger(Arc::new(LexiconTagger::new()))
        .text_generator(generator.clone())
        .config(config)
        .build()
        .expect("pipeline builds");
    Harness {
        recognizer,
        captioner,
        generator,
        pipeline,
    }
}

fn harness(texts: &[&str], caption: &str) -> Harness {
    harness_with(
        MockRecognizer::with_text(texts),
        MockCaptioner::new(caption),
        MockGenerator::new("- Delicious"),
        PipelineConfig::default(),
    )
}

#[test]
fn recognized_text_becomes_title_without_captioning() {
    let h = harness(&["Crunchy Peanut Butter 500g"], "a jar on a table");

    let result = h.pipeline.synthesize(&product_image()).unwrap();

    assert_eq!(result.title, "Crunchy Peanut Butter");
    assert_eq!(result.source, TitleSource::RecognizedText);
    assert_eq!(h.recognizer.call_count(), 1);
    assert_eq!(h.captioner.call_count(), 0);
    assert_eq!(h.generator.call_count(), 1);
}

#[test]
fn detections_are_concatenated_in_order() {
    let h = harness(&["ORGANIC", "Green Tea", "20 bags"], "unused");
    let result = h.pipeline.synthesize(&product_image()).unwrap();
    assert_eq!(result.title, "Organic Green Tea Bags");
}

#[test]
fn repeated_words_collapse_to_first_occurrence() {
    let h = harness(&["Box box BOX"], "unused");
    assert_eq!(h.pipeline.title(&product_image()).unwrap(), "Box");
}

#[test]
fn no_detections_uses_caption_exactly_once() {
    let h = harness(&[], "a jar of honey on a wooden table");

    let result = h.pipeline.synthesize(&product_image()).unwrap();

    assert_eq!(result.title, "Jar honey");
    assert_eq!(result.source, TitleSource::Caption);
    assert_eq!(h.captioner.call_count(), 1);
    assert_eq!(
        h.captioner.params.lock().unwrap().as_slice(),
        &[CaptionParams::default()]
    );
}

#[test]
fn caption_title_has_at_most_two_words() {
    for caption in [
        "a large red ceramic coffee mug on a wooden desk",
        "mug",
        "shiny shiny SHINY bottle of fresh orange juice",
    ] {
        let h = harness(&[], caption);
        let title = h.pipeline.title(&product_image()).unwrap();
        assert!(
            title.split(' ').filter(|w| !w.is_empty()).count() <= 2,
            "caption {caption:?} gave {title:?}"
        );
    }
}

#[test]
fn text_without_keywords_keeps_empty_title_by_default() {
    let h = harness(&["500", "!!!", "2x"], "a bottle of water");

    let result = h.pipeline.synthesize(&product_image()).unwrap();

    assert!(result.is_title_empty());
    assert_eq!(result.source, TitleSource::RecognizedText);
    assert_eq!(h.captioner.call_count(), 0);
    // The description is still generated from the empty title.
    assert_eq!(h.generator.call_count(), 1);
    assert!(h.generator.last_prompt().unwrap().contains("describing ''"));
}

#[test]
fn caption_fallback_policy_retries_with_caption() {
    let h = harness_with(
        MockRecognizer::with_text(&["500", "250"]),
        MockCaptioner::new("a bottle of sparkling water"),
        MockGenerator::new("- Refreshing"),
        PipelineConfig::new().with_empty_title(EmptyTitlePolicy::CaptionFallback),
    );

    let result = h.pipeline.synthesize(&product_image()).unwrap();

    assert_eq!(result.title, "Bottle sparkling");
    assert_eq!(result.source, TitleSource::Caption);
    assert_eq!(h.captioner.call_count(), 1);
}

#[test]
fn prompt_contains_title_and_description_is_returned_verbatim() {
    let h = harness(&["Wildflower Honey"], "unused");

    let mut rng = StdRng::seed_from_u64(42);
    let result = h.pipeline.synthesize_with_rng(&product_image(), &mut rng).unwrap();

    let prompt = h.generator.last_prompt().unwrap();
    assert_eq!(prompt.matches("Wildflower Honey").count(), 1);
    assert!(!result.description.is_empty());

    let mut expected_rng = StdRng::seed_from_u64(42);
    assert_eq!(
        result.description,
        format!("- Delicious ({})", rand::RngCore::next_u64(&mut expected_rng))
    );
    assert_eq!(
        h.generator.params.lock().unwrap().as_slice(),
        &[SamplingParams::default()]
    );
}

#[test]
fn seeded_runs_are_reproducible_and_unseeded_runs_differ() {
    let h = harness(&["Oat Milk"], "unused");
    let image = product_image();

    let first = h
        .pipeline
        .synthesize_with_rng(&image, &mut StdRng::seed_from_u64(1))
        .unwrap();
    let again = h
        .pipeline
        .synthesize_with_rng(&image, &mut StdRng::seed_from_u64(1))
        .unwrap();
    assert_eq!(first, again);

    let a = h.pipeline.synthesize(&image).unwrap();
    let b = h.pipeline.synthesize(&image).unwrap();
    assert_eq!(a.title, b.title);
    assert_ne!(a.description, b.description);
}

#[test]
fn title_only_does_not_generate_description() {
    let h = harness(&["Crunchy Peanut Butter"], "unused");
    h.pipeline.title(&product_image()).unwrap();
    assert_eq!(h.generator.call_count(), 0);
}

#[test]
fn recognizer_failure_aborts_without_other_calls() {
    let h = harness_with(
        MockRecognizer::failing(),
        MockCaptioner::new("a jar"),
        MockGenerator::new("- x"),
        PipelineConfig::default(),
    );

    let err = h.pipeline.synthesize(&product_image()).unwrap_err();

    assert_eq!(err.stage(), Some(ProcessingStage::Recognition));
    assert_eq!(h.captioner.call_count(), 0);
    assert_eq!(h.generator.call_count(), 0);
}

#[test]
fn captioner_failure_aborts_before_generation() {
    let h = harness_with(
        MockRecognizer::empty(),
        MockCaptioner::failing(),
        MockGenerator::new("- x"),
        PipelineConfig::default(),
    );

    let err = h.pipeline.synthesize(&product_image()).unwrap_err();

    assert_eq!(err.stage(), Some(ProcessingStage::Captioning));
    assert_eq!(h.generator.call_count(), 0);
}

#[test]
fn generator_failure_yields_no_result() {
    let h = harness_with(
        MockRecognizer::with_text(&["Green Tea"]),
        MockCaptioner::new("unused"),
        MockGenerator::failing(),
        PipelineConfig::default(),
    );

    let err = h.pipeline.synthesize(&product_image()).unwrap_err();
    assert_eq!(err.stage(), Some(ProcessingStage::Generation));
    assert!(err.to_string().contains("mock-generator"));
}

#[test]
fn pipeline_is_shareable_across_threads() {
    let h = harness(&["Dark Chocolate"], "unused");
    let pipeline = Arc::new(h.pipeline);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let pipeline = Arc::clone(&pipeline);
            std::thread::spawn(move || pipeline.synthesize(&product_image()).unwrap().title)
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), "Dark Chocolate");
    }
    assert_eq!(h.recognizer.call_count(), 4);
}

#[test]
fn result_serializes_to_title_and_description() {
    let h = harness(&["Dark Chocolate"], "unused");
    let result = h
        .pipeline
        .synthesize_with_rng(&product_image(), &mut StdRng::seed_from_u64(3))
        .unwrap();
    let value = serde_json::to_value(&result).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 2);
    assert_eq!(object["title"], "Dark Chocolate");
}
