#[cfg(test)]
mod tests {
    use std::fs::{self, File};
    use std::io::Write;
    use std::path::Path;

    use labelstudio2yolo::{
        interpolate_track, interpolate_tracks, load_annotations, run_conversion, sample_frames,
        write_labels, ConvertConfig, ConvertError, FrameLabels, Keypoint, Selector,
        SyntheticSource, Track,
    };

    const EPS: f64 = 1e-5;

    fn track(label_indices: Vec<usize>, points: &[(usize, f64, f64, f64, f64)]) -> Track {
        Track {
            label_indices,
            keypoints: points
                .iter()
                .map(|&(frame, x, y, width, height)| Keypoint {
                    frame,
                    x,
                    y,
                    width,
                    height,
                })
                .collect(),
        }
    }

    #[test]
    fn test_midpoint_interpolation() {
        // Pure translation: corner moves (10,10) -> (20,20) over 10 frames,
        // size constant at 20x20.
        let track = track(
            vec![0],
            &[
                (0, 10.0, 10.0, 20.0, 20.0),
                (10, 20.0, 20.0, 20.0, 20.0),
            ],
        );
        let mut labels = FrameLabels::new(20);
        interpolate_track(0, &track, &mut labels).unwrap();

        let at_5 = labels.get(5).unwrap();
        assert_eq!(at_5.len(), 1);
        assert!((at_5[0].cx - 0.25).abs() <= EPS);
        assert!((at_5[0].cy - 0.25).abs() <= EPS);
        assert!((at_5[0].width - 0.2).abs() <= EPS);
        assert!((at_5[0].height - 0.2).abs() <= EPS);
    }

    #[test]
    fn test_terminal_keypoint_geometry() {
        // Size changes concurrently with position; the accumulated state must
        // still land exactly on the final keyframe.
        let track = track(
            vec![0],
            &[
                (0, 10.0, 10.0, 10.0, 10.0),
                (5, 40.0, 30.0, 20.0, 16.0),
            ],
        );
        let mut labels = FrameLabels::new(10);
        interpolate_track(0, &track, &mut labels).unwrap();

        let last = labels.get(5).unwrap();
        assert_eq!(last.len(), 1);
        assert!((last[0].cx * 100.0 - (40.0 + 20.0 / 2.0)).abs() <= EPS);
        assert!((last[0].cy * 100.0 - (30.0 + 16.0 / 2.0)).abs() <= EPS);
        assert!((last[0].width * 100.0 - 20.0).abs() <= EPS);
        assert!((last[0].height * 100.0 - 16.0).abs() <= EPS);
        // No interpolation past the terminal keyframe.
        assert!(labels.get(6).unwrap().is_empty());
    }

    #[test]
    fn test_covered_frames_and_length() {
        let track = track(
            vec![0],
            &[
                (2, 10.0, 10.0, 20.0, 20.0),
                (7, 20.0, 20.0, 20.0, 20.0),
            ],
        );
        let mut labels = FrameLabels::new(12);
        interpolate_track(0, &track, &mut labels).unwrap();

        assert_eq!(labels.frames_count(), 12);
        for frame in 0..12 {
            let expected = usize::from((2..=7).contains(&frame));
            assert_eq!(labels.get(frame).unwrap().len(), expected, "frame {frame}");
        }
    }

    #[test]
    fn test_multilabel_replication() {
        let track = track(
            vec![0, 1],
            &[
                (0, 10.0, 10.0, 20.0, 20.0),
                (4, 14.0, 18.0, 20.0, 20.0),
            ],
        );
        let mut labels = FrameLabels::new(5);
        interpolate_track(0, &track, &mut labels).unwrap();

        for frame in 0..5 {
            let detections = labels.get(frame).unwrap();
            assert_eq!(detections.len(), 2);
            assert_eq!(detections[0].label_index, 0);
            assert_eq!(detections[1].label_index, 1);
            assert_eq!(detections[0].cx, detections[1].cx);
            assert_eq!(detections[0].cy, detections[1].cy);
            assert_eq!(detections[0].width, detections[1].width);
            assert_eq!(detections[0].height, detections[1].height);
        }
    }

    #[test]
    fn test_normalized_output_in_unit_range() {
        let track = track(
            vec![0],
            &[
                (0, 0.0, 0.0, 100.0, 100.0),
                (10, 80.0, 90.0, 20.0, 10.0),
                (25, 5.0, 5.0, 50.0, 60.0),
            ],
        );
        let mut labels = FrameLabels::new(30);
        interpolate_track(0, &track, &mut labels).unwrap();

        for (_, detections) in labels.iter() {
            for d in detections {
                for value in [d.cx, d.cy, d.width, d.height] {
                    assert!((0.0..=1.0).contains(&value), "out of range: {value}");
                }
            }
        }
    }

    #[test]
    fn test_single_keypoint_track() {
        let track = track(vec![0], &[(3, 10.0, 20.0, 30.0, 40.0)]);
        let mut labels = FrameLabels::new(8);
        interpolate_track(0, &track, &mut labels).unwrap();

        for frame in 0..8 {
            let expected = usize::from(frame == 3);
            assert_eq!(labels.get(frame).unwrap().len(), expected, "frame {frame}");
        }
        let only = labels.get(3).unwrap()[0];
        assert!((only.cx - 0.25).abs() <= EPS);
        assert!((only.cy - 0.40).abs() <= EPS);
    }

    #[test]
    fn test_keypoint_beyond_frame_count_is_rejected() {
        let track = track(
            vec![0],
            &[
                (0, 10.0, 10.0, 20.0, 20.0),
                (6, 20.0, 20.0, 20.0, 20.0),
            ],
        );
        let mut labels = FrameLabels::new(4);
        let err = interpolate_track(0, &track, &mut labels).unwrap_err();
        assert!(matches!(err, ConvertError::FrameOutOfRange { .. }));
    }

    fn write_export(dir: &Path) -> (std::path::PathBuf, std::path::PathBuf) {
        let export_path = dir.join("export.json");
        let names_path = dir.join("names.txt");
        let export = r#"[
            {
                "id": 101,
                "annotations": [
                    {
                        "result": [
                            {
                                "value": {
                                    "framesCount": 20,
                                    "labels": ["cat", "dog"],
                                    "sequence": [
                                        {"frame": 1, "x": 10.0, "y": 10.0, "width": 20.0, "height": 20.0},
                                        {"frame": 11, "x": 20.0, "y": 20.0, "width": 20.0, "height": 20.0}
                                    ]
                                }
                            }
                        ]
                    }
                ]
            },
            {
                "id": 102,
                "annotations": [
                    {
                        "result": [
                            {
                                "value": {
                                    "framesCount": 5,
                                    "labels": ["cat"],
                                    "sequence": [
                                        {"frame": 3, "x": 40.0, "y": 40.0, "width": 10.0, "height": 10.0}
                                    ]
                                }
                            }
                        ]
                    }
                ]
            }
        ]"#;
        File::create(&export_path)
            .unwrap()
            .write_all(export.as_bytes())
            .unwrap();
        File::create(&names_path)
            .unwrap()
            .write_all(b"cat\ndog\n")
            .unwrap();
        (export_path, names_path)
    }

    #[test]
    fn test_loader_selects_task_and_rebases_frames() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (export_path, names_path) = write_export(temp_dir.path());
        let names = labelstudio2yolo::utils::read_label_names(&names_path).unwrap();
        assert_eq!(names, vec!["cat".to_string(), "dog".to_string()]);

        let loaded = load_annotations(&export_path, &names, Selector::Id(101)).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].task_id, 101);
        assert_eq!(loaded[0].frames_count, 20);
        assert_eq!(loaded[0].tracks.len(), 1);
        // The export's 1-based frames become 0-based at ingestion.
        assert_eq!(loaded[0].tracks[0].keypoints[0].frame, 0);
        assert_eq!(loaded[0].tracks[0].keypoints[1].frame, 10);
        assert_eq!(loaded[0].tracks[0].label_indices, vec![0, 1]);
    }

    #[test]
    fn test_loader_id_not_found() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (export_path, names_path) = write_export(temp_dir.path());
        let names = labelstudio2yolo::utils::read_label_names(&names_path).unwrap();

        let err = load_annotations(&export_path, &names, Selector::Id(999)).unwrap_err();
        assert!(matches!(err, ConvertError::ItemNotFound { id: 999 }));
    }

    #[test]
    fn test_loader_unknown_label() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (export_path, _) = write_export(temp_dir.path());
        let names = vec!["cat".to_string()];

        let err = load_annotations(&export_path, &names, Selector::Id(101)).unwrap_err();
        match err {
            ConvertError::UnknownLabel { label } => assert_eq!(label, "dog"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_loader_frames_count_selector_takes_every_task() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (export_path, names_path) = write_export(temp_dir.path());
        let names = labelstudio2yolo::utils::read_label_names(&names_path).unwrap();

        let loaded =
            load_annotations(&export_path, &names, Selector::FramesCount(40)).unwrap();
        assert_eq!(loaded.len(), 2);
        assert!(loaded.iter().all(|a| a.frames_count == 40));
    }

    #[test]
    fn test_loader_rejects_non_monotonic_sequence() {
        let temp_dir = tempfile::tempdir().unwrap();
        let export_path = temp_dir.path().join("export.json");
        let export = r#"[
            {
                "id": 1,
                "annotations": [
                    {
                        "result": [
                            {
                                "value": {
                                    "framesCount": 10,
                                    "labels": ["cat"],
                                    "sequence": [
                                        {"frame": 5, "x": 0.0, "y": 0.0, "width": 1.0, "height": 1.0},
                                        {"frame": 5, "x": 1.0, "y": 1.0, "width": 1.0, "height": 1.0}
                                    ]
                                }
                            }
                        ]
                    }
                ]
            }
        ]"#;
        File::create(&export_path)
            .unwrap()
            .write_all(export.as_bytes())
            .unwrap();

        let err =
            load_annotations(&export_path, &["cat".to_string()], Selector::Id(1)).unwrap_err();
        assert!(matches!(err, ConvertError::NonMonotonicSequence { .. }));
    }

    #[test]
    fn test_writer_padding_and_empty_frames() {
        let temp_dir = tempfile::tempdir().unwrap();
        let track = track(
            vec![1],
            &[
                (0, 10.0, 10.0, 20.0, 20.0),
                (2, 12.0, 12.0, 20.0, 20.0),
            ],
        );
        let mut labels = FrameLabels::new(120);
        interpolate_tracks(&[track], &mut labels).unwrap();

        let written = write_labels(&labels, temp_dir.path(), None).unwrap();
        assert_eq!(written, 120);

        // Padding width follows the total frame count (120 -> 3 digits).
        let first = fs::read_to_string(temp_dir.path().join("frame_000.txt")).unwrap();
        assert_eq!(first, "1 0.200000 0.200000 0.200000 0.200000\n");
        let empty = fs::read_to_string(temp_dir.path().join("frame_119.txt")).unwrap();
        assert!(empty.is_empty());
        assert!(temp_dir.path().join("frame_003.txt").exists());
    }

    #[test]
    fn test_conversion_is_idempotent() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (export_path, names_path) = write_export(temp_dir.path());

        let mut outputs = Vec::new();
        for run in 0..2 {
            let output_dir = temp_dir.path().join(format!("out_{run}"));
            let config = ConvertConfig {
                input: export_path.clone(),
                names: names_path.clone(),
                output_dir: output_dir.clone(),
                selector: Selector::Id(101),
            };
            let summary = run_conversion(&config).unwrap();
            assert_eq!(summary.tasks, 1);
            assert_eq!(summary.frames_written, 20);

            let mut files: Vec<_> = fs::read_dir(&output_dir)
                .unwrap()
                .map(|entry| entry.unwrap().path())
                .collect();
            files.sort();
            let bytes: Vec<(String, Vec<u8>)> = files
                .iter()
                .map(|path| {
                    (
                        path.file_name().unwrap().to_string_lossy().into_owned(),
                        fs::read(path).unwrap(),
                    )
                })
                .collect();
            outputs.push(bytes);
        }

        assert_eq!(outputs[0].len(), 20);
        assert_eq!(outputs[0], outputs[1]);
    }

    #[test]
    fn test_sampler_expected_count_and_drift_bound() {
        let mut source = SyntheticSource::new(30.0, 300);
        let mut timestamps = Vec::new();
        let report = sample_frames(&mut source, 25.0, |_, &ts| {
            timestamps.push(ts);
            Ok(())
        })
        .unwrap();

        assert_eq!(report.expected, 250);
        assert_eq!(report.emitted, 250);
        assert_eq!(report.last_index, 249);

        // Frame 0 is always emitted.
        assert_eq!(timestamps[0], 0.0);
        let interval = 1.0 / 25.0;
        for (k, pair) in timestamps.windows(2).enumerate() {
            // Never two emissions from the same decoded frame, and emission k
            // never runs ahead of its drift-bounded slot k/target_rate.
            assert!(pair[1] - pair[0] >= 1.0 / 30.0 - 1e-9);
            assert!(pair[1] >= (k + 1) as f64 * interval - 1e-9);
        }
    }

    #[test]
    fn test_sampler_short_source_reports_not_errors() {
        // Upsampling a short source: every frame is emitted but the expected
        // count cannot be reached.
        let mut source = SyntheticSource::new(30.0, 30);
        let mut emitted = 0usize;
        let report = sample_frames(&mut source, 60.0, |_, _| {
            emitted += 1;
            Ok(())
        })
        .unwrap();

        assert_eq!(report.expected, 60);
        assert_eq!(report.emitted, 30);
        assert_eq!(report.emitted, emitted);
        assert!(report.emitted < report.expected);
    }

    #[test]
    fn test_sampler_empty_source() {
        let mut source = SyntheticSource::new(30.0, 0);
        let report = sample_frames(&mut source, 25.0, |_, _| Ok(())).unwrap();
        assert_eq!(report.emitted, 0);
    }
}
