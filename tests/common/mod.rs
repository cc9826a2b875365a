#![allow(dead_code)]

use calorie_ml::{dataset, CaloriePipeline, TrainingRecord};

pub const HEADER: &str = "Age,Gender,Weight (kg),Height (m),Max_BPM,Avg_BPM,Resting_BPM,Session_Duration (hours),Calories_Burned,Workout_Type,Fat_Percentage,Water_Intake (liters),Workout_Frequency (days/week),Experience_Level,BMI,Calories,serving_size_g,Sets,Reps";

pub const WORKOUTS: [&str; 4] = ["Cardio", "HIIT", "Strength", "Yoga"];

/// Синтетический датасет: калории = 600 * длительность + поправка за тип + шум
pub fn synthetic_csv(n: usize) -> String {
    let mut csv = String::from(HEADER);
    csv.push('\n');
    for i in 0..n {
        let duration = 0.5 + (i % 7) as f64 * 0.25;
        let workout = WORKOUTS[i % 4];
        let bonus = match workout {
            "HIIT" => 120.0,
            "Strength" => -40.0,
            "Yoga" => -150.0,
            _ => 0.0,
        };
        let noise = ((i as f64) * 12.9898).sin() * 2.0;
        let burned = 600.0 * duration + bonus + noise;
        csv.push_str(&format!(
            "{age},Male,70,{height:.2},{max},{avg},{rest},{duration},{burned:.4},{workout},{fat},2.5,{freq},{exp},24.1,{cal},{serving},{sets},{reps}\n",
            age = 20 + i % 17,
            height = 1.6 + (i % 5) as f64 * 0.05,
            max = 170 + i % 11,
            avg = 120 + i % 13,
            rest = 55 + i % 9,
            fat = 15 + (i / 3) % 10,
            freq = 2 + (i / 2) % 4,
            exp = 1 + (i / 7) % 3,
            cal = 200 + i % 50,
            serving = if i % 10 == 0 { 0 } else { 100 + i % 30 },
            sets = 1 + i % 6,
            reps = 5 + i % 8,
        ));
    }
    csv
}

pub fn records(csv: &str) -> Vec<TrainingRecord> {
    dataset::read_records(csv.as_bytes()).unwrap()
}

pub fn fitted_pipeline(n: usize) -> CaloriePipeline {
    CaloriePipeline::fit_records(&records(&synthetic_csv(n))).unwrap()
}
