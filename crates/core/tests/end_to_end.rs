use std::path::Path;

use tempfile::TempDir;
use tumblr_sft_serializer_core::{run, Config, Role, TiktokenTokenizer, Tokenizer, TrainingRecord};

const EXPORT: &str = concat!(
    "Post id: 100\n",
    "Reblog url: \n",
    "Reblog name: \n",
    "Title: greeting\n",
    "Body: <p>Hello <b>world</b></p>\n",
    "Tags: hello\n",
    "\n",
    "Post id: 101\n",
    "Reblog url: https://someone.tumblr.com/post/5\n",
    "Reblog name: someone\n",
    "Title: shared\n",
    "Body: <p>Not mine</p>\n",
    "Tags: reblog\n",
);

fn config_for(root: &Path) -> Config {
    let mut config = Config::from_toml(
        r#"
        model_name = "gpt-4o-mini"
        system_message = "You are a blogger."
        user_message = "Write a post."

        [training]
        expected_epochs = 2
        "#,
    )
    .unwrap();
    config.training.data_directory = root.join("data");
    config.training.output_file = root.join("output/training.jsonl");
    config
}

#[test]
fn test_single_original_post() {
    let temp = TempDir::new().unwrap();
    let config = config_for(temp.path());
    std::fs::create_dir_all(&config.training.data_directory).unwrap();
    std::fs::write(config.training.data_directory.join("posts.txt"), EXPORT).unwrap();

    let stats = run(&config).unwrap();

    let output = std::fs::read_to_string(&config.training.output_file).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 1);

    let record: TrainingRecord = serde_json::from_str(lines[0]).unwrap();
    let roles: Vec<Role> = record.messages.iter().map(|m| m.role).collect();
    assert_eq!(roles, vec![Role::System, Role::User, Role::Assistant]);
    assert_eq!(record.messages[2].content, "Hello world");

    let tokenizer = TiktokenTokenizer::for_model("gpt-4o-mini").unwrap();
    let expected = 12
        + tokenizer.count_tokens("Hello world")
        + tokenizer.count_tokens("You are a blogger.")
        + tokenizer.count_tokens("Write a post.");
    assert_eq!(stats.total_tokens, expected);
    assert_eq!(stats.records_written, 1);
}

#[test]
fn test_rerun_overwrites_corpus() {
    let temp = TempDir::new().unwrap();
    let config = config_for(temp.path());
    std::fs::create_dir_all(&config.training.data_directory).unwrap();
    std::fs::write(config.training.data_directory.join("a.txt"), EXPORT).unwrap();
    std::fs::write(config.training.data_directory.join("b.txt"), EXPORT).unwrap();

    let first = run(&config).unwrap();
    let second = run(&config).unwrap();
    assert_eq!(first, second);
    assert_eq!(second.records_written, 2);

    let output = std::fs::read_to_string(&config.training.output_file).unwrap();
    assert_eq!(output.lines().count(), 2);
}

#[test]
fn test_exports_without_posts_produce_empty_corpus() {
    let temp = TempDir::new().unwrap();
    let config = config_for(temp.path());
    std::fs::create_dir_all(&config.training.data_directory).unwrap();
    std::fs::write(
        config.training.data_directory.join("junk.txt"),
        "nothing that looks like a post\n",
    )
    .unwrap();

    let stats = run(&config).unwrap();
    assert_eq!(stats.records_written, 0);
    assert_eq!(stats.total_tokens, 0);
    assert_eq!(std::fs::read_to_string(&config.training.output_file).unwrap(), "");
}
