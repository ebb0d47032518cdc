//! Integration tests for Cachet

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn cachet() -> Command {
        cargo_bin_cmd!("cachet")
    }

    /// A mounted "remote" plus a cache root, wired together by a config file
    struct Workspace {
        dir: TempDir,
    }

    impl Workspace {
        fn new() -> Self {
            Self::with_config("")
        }

        fn with_config(extra: &str) -> Self {
            let dir = TempDir::new().unwrap();
            std::fs::create_dir_all(dir.path().join("remote")).unwrap();
            let config = format!(
                "{extra}\n[cache]\nroot = {:?}\n\n[remote]\nbackend = \"mounted\"\nroot = {:?}\n",
                dir.path().join("cache"),
                dir.path().join("remote"),
            );
            std::fs::write(dir.path().join("config.toml"), config).unwrap();
            Self { dir }
        }

        fn config(&self) -> PathBuf {
            self.dir.path().join("config.toml")
        }

        fn cache(&self) -> PathBuf {
            self.dir.path().join("cache")
        }

        fn put(&self, identifier: &str, content: &[u8]) -> PathBuf {
            let path = self.dir.path().join("remote").join(identifier.trim_start_matches('/'));
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(&path, content).unwrap();
            path
        }

        fn cmd(&self) -> Command {
            let mut cmd = cachet();
            cmd.arg("--config").arg(self.config());
            cmd
        }
    }

    fn stdout_path(output: &[u8]) -> PathBuf {
        PathBuf::from(String::from_utf8_lossy(output).trim())
    }

    fn tar_up(file: &Path, archive: &Path) {
        let status = std::process::Command::new("tar")
            .arg("-cf")
            .arg(archive)
            .arg("-C")
            .arg(file.parent().unwrap())
            .arg(file.file_name().unwrap())
            .status()
            .unwrap();
        assert!(status.success());
    }

    #[test]
    fn help_displays() {
        cachet()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Cross-process local cache"));
    }

    #[test]
    fn version_displays() {
        cachet()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("cachet"));
    }

    #[test]
    fn path_shows_slot_layout() {
        cachet()
            .args(["path", "/data/foo/bar.tar", "--cache-root", "/home/u/.cache-dir"])
            .assert()
            .success()
            .stdout(
                "/home/u/.cache-dir/__data__foo__bar.tar\n\
                 /home/u/.cache-dir/__data__foo__bar.tar.lock\n\
                 /home/u/.cache-dir/__data__foo__bar.tar.dir\n",
            );
    }

    #[test]
    fn get_copies_then_reuses() {
        let ws = Workspace::new();
        ws.put("/data/input.csv", b"id,value\n1,2\n");

        let first = ws
            .cmd()
            .args(["get", "/data/input.csv"])
            .assert()
            .success()
            .stderr(predicate::str::contains("Copied"));
        let local = stdout_path(&first.get_output().stdout);
        assert_eq!(local, ws.cache().join("__data__input.csv"));
        assert_eq!(std::fs::read(&local).unwrap(), b"id,value\n1,2\n");

        ws.cmd()
            .args(["get", "/data/input.csv", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"updated\": false"))
            .stderr(predicate::str::contains("update not required"));
    }

    #[test]
    fn get_refreshes_changed_remote() {
        let ws = Workspace::new();
        ws.put("/data/input.csv", b"old");
        ws.cmd().args(["get", "/data/input.csv"]).assert().success();

        ws.put("/data/input.csv", b"new and longer");
        let output = ws
            .cmd()
            .args(["get", "/data/input.csv", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"updated\": true"));
        let json: serde_json::Value =
            serde_json::from_slice(&output.get_output().stdout).unwrap();
        let local = PathBuf::from(json["local_path"].as_str().unwrap());
        assert_eq!(std::fs::read(local).unwrap(), b"new and longer");
    }

    #[test]
    fn get_missing_remote_fails() {
        let ws = Workspace::new();
        ws.cmd()
            .args(["get", "/data/absent.bin"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Remote resource not found: /data/absent.bin"))
            .stderr(predicate::str::contains("Hint:"));
        assert!(!ws.cache().exists());
    }

    #[test]
    fn endpoint_overrides_mount_root() {
        let ws = Workspace::new();
        let other = TempDir::new().unwrap();
        std::fs::write(other.path().join("elsewhere.txt"), b"other cluster").unwrap();

        let output = ws
            .cmd()
            .args(["get", "/elsewhere.txt", "--endpoint"])
            .arg(other.path())
            .assert()
            .success();
        let local = stdout_path(&output.get_output().stdout);
        assert_eq!(std::fs::read(local).unwrap(), b"other cluster");
    }

    #[test]
    fn tarball_extracts_and_reuses() {
        let ws = Workspace::new();
        let staging = TempDir::new().unwrap();
        let file = staging.path().join("weights.txt");
        std::fs::write(&file, b"0.1 0.2 0.3").unwrap();
        let archive = ws.put("/models/latest.tar", b"");
        tar_up(&file, &archive);

        let output = ws
            .cmd()
            .args(["tarball", "/models/latest.tar"])
            .assert()
            .success();
        let dir = stdout_path(&output.get_output().stdout);
        assert_eq!(dir, ws.cache().join("__models__latest.tar.dir"));
        assert_eq!(std::fs::read(dir.join("weights.txt")).unwrap(), b"0.1 0.2 0.3");

        ws.cmd()
            .args(["tarball", "/models/latest.tar", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"rebuilt\": false"));
    }

    #[test]
    fn tarball_of_garbage_fails() {
        let ws = Workspace::new();
        ws.put("/models/broken.tar", b"not an archive at all");

        ws.cmd()
            .args(["tarball", "/models/broken.tar"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Extraction of"));
        assert!(!ws.cache().join("__models__broken.tar.dir").exists());
    }

    #[test]
    fn unsupported_digest_fails() {
        let ws = Workspace::with_config("");
        let config = std::fs::read_to_string(ws.config())
            .unwrap()
            .replace("[cache]\n", "[cache]\ndigest = \"md5\"\n");
        std::fs::write(ws.config(), config).unwrap();
        ws.put("/data/input.csv", b"x");

        ws.cmd()
            .args(["get", "/data/input.csv"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unsupported digest algorithm: md5"));
    }

    #[test]
    fn json_log_format() {
        let ws = Workspace::with_config("[general]\nlog_format = \"json\"\n");
        ws.put("/data/input.csv", b"x");

        ws.cmd()
            .args(["get", "/data/input.csv"])
            .assert()
            .success()
            .stderr(predicate::str::contains("\"level\":\"INFO\""));
    }

    #[test]
    fn parallel_processes_copy_once() {
        let ws = Workspace::new();
        ws.put("/data/shared.bin", &vec![7u8; 4 * 1024 * 1024]);

        let children: Vec<_> = (0..4)
            .map(|_| {
                std::process::Command::new(env!("CARGO_BIN_EXE_cachet"))
                    .arg("--config")
                    .arg(ws.config())
                    .args(["get", "/data/shared.bin"])
                    .stdout(std::process::Stdio::piped())
                    .stderr(std::process::Stdio::piped())
                    .spawn()
                    .unwrap()
            })
            .collect();

        let mut copies = 0;
        for child in children {
            let output = child.wait_with_output().unwrap();
            assert!(output.status.success());
            if String::from_utf8_lossy(&output.stderr).contains("Copied") {
                copies += 1;
            }
        }

        assert_eq!(copies, 1);
        let local = ws.cache().join("__data__shared.bin");
        assert_eq!(std::fs::read(local).unwrap().len(), 4 * 1024 * 1024);
    }

    #[test]
    fn config_path_honors_flag() {
        let ws = Workspace::new();
        ws.cmd()
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let ws = Workspace::new();
        ws.cmd()
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("backend = \"mounted\""));
    }

    #[test]
    fn config_init_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fresh").join("config.toml");

        cachet()
            .arg("--config")
            .arg(&path)
            .args(["config", "init"])
            .assert()
            .success();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("[remote]"));
    }
}
