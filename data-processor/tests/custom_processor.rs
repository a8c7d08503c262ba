// Behaviour of the callback adapter as seen by an upstream caller
use data_processor::{
    BoxedDataProcessor, CustomDataProcessor, Data, DataKind, DataProcessor, ProcessError,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::thread;

#[derive(Debug, PartialEq)]
struct TokenizerError {
    position: usize,
}

impl std::fmt::Display for TokenizerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unexpected token at {}", self.position)
    }
}

impl std::error::Error for TokenizerError {}

fn sample() -> Data {
    serde_json::from_str(r#"{"id": 7, "text": "hello world", "scores": [0.5, 1, true]}"#)
        .unwrap()
}

/// Splits `text` into a list of words, failing on empty text
fn tokenize(d: Data) -> data_processor::Result<Data> {
    let mut entries = d.into_dict()?;
    let text = entries
        .remove("text")
        .ok_or_else(|| ProcessError::MissingKey("text".to_string()))?;
    let text = text
        .as_str()
        .ok_or_else(|| ProcessError::type_mismatch(DataKind::String, &text))?;

    if text.is_empty() {
        return Err(ProcessError::custom(TokenizerError { position: 0 }));
    }

    let tokens = text.split_whitespace().map(Data::from).collect::<Vec<_>>();
    entries.insert("tokens".to_string(), Data::List(tokens));
    Ok(Data::Dict(entries))
}

#[test]
fn test_json_fixture_shape() {
    let data = sample();
    assert_eq!(data.kind(), DataKind::Dict);
    assert_eq!(data.get("id"), Some(&Data::Int(7)));

    let scores = data.get("scores").and_then(Data::as_list).unwrap();
    assert_eq!(scores, &[Data::Float(0.5), Data::Int(1), Data::Bool(true)][..]);
}

#[test]
fn test_process_equals_direct_call() {
    let processor = CustomDataProcessor::new(tokenize);

    let via_adapter = processor.process(sample()).unwrap();
    let direct = tokenize(sample()).unwrap();
    assert_eq!(via_adapter, direct);

    let tokens = via_adapter.get("tokens").and_then(Data::as_list).unwrap();
    assert_eq!(tokens, &[Data::from("hello"), Data::from("world")][..]);
    assert_eq!(via_adapter.get("text"), None);
}

#[test]
fn test_process_surfaces_identical_error() {
    let processor = CustomDataProcessor::new(tokenize);

    let mut entries = BTreeMap::new();
    entries.insert("text".to_string(), Data::from(""));

    match processor.process(Data::Dict(entries)) {
        Err(ProcessError::Custom(inner)) => {
            let err = inner.downcast_ref::<TokenizerError>().unwrap();
            assert_eq!(err, &TokenizerError { position: 0 });
        }
        other => panic!("unexpected result: {:?}", other),
    }

    match processor.process(Data::Int(1)) {
        Err(ProcessError::TypeMismatch { expected, found }) => {
            assert_eq!(expected, DataKind::Dict);
            assert_eq!(found, DataKind::Int);
        }
        other => panic!("unexpected result: {:?}", other),
    }

    let err = processor.process(Data::Dict(BTreeMap::new())).unwrap_err();
    assert_eq!(err.to_string(), "Missing key: text");
}

#[test]
fn test_equivalent_copies_give_equivalent_outputs() {
    let processor = CustomDataProcessor::new(tokenize);
    let original = sample();

    let first = processor.process(original.clone()).unwrap();
    let second = processor.process(original.clone()).unwrap();
    assert_eq!(first, second);

    // The caller's copy is untouched
    assert_eq!(original, sample());
}

#[test]
fn test_trait_object_forms_agree() {
    let concrete = CustomDataProcessor::new(tokenize);
    let boxed: BoxedDataProcessor = CustomDataProcessor::new(tokenize).boxed();
    let shared: Arc<dyn DataProcessor + Send + Sync> = Arc::new(CustomDataProcessor::new(tokenize));
    let by_ref: &dyn DataProcessor = &concrete;

    let expected = concrete.process(sample()).unwrap();
    assert_eq!(boxed.process(sample()).unwrap(), expected);
    assert_eq!(shared.process(sample()).unwrap(), expected);
    assert_eq!(by_ref.process(sample()).unwrap(), expected);
}

#[test]
fn test_stages_held_side_by_side() {
    let stages: Vec<BoxedDataProcessor> = vec![
        CustomDataProcessor::new(tokenize).boxed(),
        CustomDataProcessor::new(|d: Data| Ok(Data::Int(d.get("id").and_then(Data::as_int).unwrap_or(-1))))
            .boxed(),
    ];

    let outputs: Vec<Data> = stages
        .iter()
        .map(|stage| stage.process(sample()).unwrap())
        .collect();

    assert_eq!(outputs[0].kind(), DataKind::Dict);
    assert_eq!(outputs[1], Data::Int(7));
}

#[test]
fn test_boxed_processor_moves_across_threads() {
    let processor = CustomDataProcessor::new(tokenize).boxed();

    let output = thread::spawn(move || processor.process(sample()))
        .join()
        .unwrap()
        .unwrap();

    assert!(output.get("tokens").is_some());
}

#[test]
fn test_process_iter_over_boxed_processor() {
    let _ = env_logger::builder().is_test(true).try_init();

    let processor = CustomDataProcessor::new(|d: Data| {
        Ok(Data::Int(d.as_int().ok_or_else(|| ProcessError::InvalidData(d.to_string()))? * 10))
    })
    .boxed();

    let outputs = processor
        .process_iter((1..=4i64).map(Data::from))
        .collect::<data_processor::Result<Vec<_>>>()
        .unwrap();
    assert_eq!(outputs, vec![Data::Int(10), Data::Int(20), Data::Int(30), Data::Int(40)]);

    let err = processor
        .process_iter(vec![Data::Int(1), Data::Bool(true), Data::Int(2)])
        .collect::<data_processor::Result<Vec<_>>>()
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid data: true");
}
