/// Language of the user interface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Language {
    #[default]
    #[value(name = "en")]
    English,
    #[value(name = "ja")]
    Japanese,
}

impl Language {
    #[must_use]
    pub fn text(self) -> &'static Text {
        match self {
            Self::English => &ENGLISH,
            Self::Japanese => &JAPANESE,
        }
    }
}

/// Every piece of user-facing text shown by the terminal UI.
#[derive(Debug)]
pub struct Text {
    pub title: &'static str,
    pub intro_title: &'static str,
    pub intro: &'static [&'static str],
    pub rules_title: &'static str,
    pub rules: &'static [&'static str],
    pub table_intro: &'static str,
    /// Column headers: the three doors, then the result of staying and of switching.
    pub table_header: [&'static str; 5],
    pub car: &'static str,
    pub goat: &'static str,
    pub win: &'static str,
    pub lose: &'static str,
    pub start: &'static str,
    pub door_count: &'static str,

    pub play_tab: &'static str,
    pub simulation_tab: &'static str,
    pub door: &'static str,
    pub host_name: &'static str,
    pub host_intro: &'static str,
    pub host_reveal: &'static str,
    pub host_win: &'static str,
    pub host_lose: &'static str,
    pub pick_prompt: &'static str,
    pub door_input: &'static str,
    pub opened_doors: &'static str,
    pub switch_prompt: &'static str,
    pub you_picked: &'static str,
    pub host_left_closed: &'static str,
    pub you_won: &'static str,
    pub you_lost: &'static str,
    pub car_was_behind: &'static str,

    pub score: &'static str,
    pub wins: &'static str,
    pub losses: &'static str,
    pub played: &'static str,
    pub win_rate: &'static str,

    pub trials: &'static str,
    pub mode: &'static str,
    pub stay_rate: &'static str,
    pub switch_rate: &'static str,
    pub theory: &'static str,
    pub no_simulation: &'static str,

    pub key_select: &'static str,
    pub key_confirm: &'static str,
    pub key_stay: &'static str,
    pub key_switch: &'static str,
    pub key_play_again: &'static str,
    pub key_run: &'static str,
    pub key_trials: &'static str,
    pub key_mode: &'static str,
    pub key_tab: &'static str,
    pub key_doors: &'static str,
    pub key_home: &'static str,
    pub key_start: &'static str,
    pub key_quit: &'static str,
}

pub static ENGLISH: Text = Text {
    title: "Cognitive Science of Learning: Interactive Probability Visualization",
    intro_title: "Why 'Explorable Explanations'?",
    intro: &[
        "This project is inspired by Explorable Explanations, pioneered by creators like Nicky Case.",
        "We usually learn mathematical theorems by memorizing formulas.",
        "Explorable Explanations let you play with the system first and build intuition before the formal learning.",
    ],
    rules_title: "The Experiment: The Monty Hall Paradox",
    rules: &[
        "1. There are 3 doors. Behind one is a supercar; behind the others are goats.",
        "2. You pick a door.",
        "3. The host, who knows what is behind every door, opens one of the other doors to reveal a goat.",
        "4. The host asks: \"Do you want to stick with your choice or switch?\"",
        "Most people assume it is a 50/50 chance. Switching is in fact the winning strategy!",
    ],
    table_intro: "See the logic below. Switching wins in 2 out of 3 scenarios:",
    table_header: ["Door 1 (Pick)", "Door 2", "Door 3", "If Stay", "If Switch"],
    car: "Car",
    goat: "Goat",
    win: "WIN",
    lose: "LOSE",
    start: "Start Experiment",
    door_count: "Number of doors",

    play_tab: "Play Game",
    simulation_tab: "Simulation (Proof)",
    door: "Door",
    host_name: "Host Monty",
    host_intro: "Welcome to the show! I have hidden a car behind one of these doors...",
    host_reveal: "Ha! Look! There were GOATS behind those doors! Now... do you trust your gut?",
    host_win: "UNBELIEVABLE! You found the car!",
    host_lose: "Sorry! It was a goat.",
    pick_prompt: "Pick a door! The car is hidden behind one.",
    door_input: "Door number",
    opened_doors: "Doors opened by the host",
    switch_prompt: "The host opened all other doors except one! Do you switch?",
    you_picked: "You picked",
    host_left_closed: "Host left closed",
    you_won: "YOU WON! Found the car!",
    you_lost: "You got a goat.",
    car_was_behind: "The car was behind",

    score: "Your Score",
    wins: "Wins",
    losses: "Losses",
    played: "Played",
    win_rate: "Win rate",

    trials: "Trials",
    mode: "Mode",
    stay_rate: "Win rate (Stay)",
    switch_rate: "Win rate (Switch)",
    theory: "theory",
    no_simulation: "Press Enter to run the simulation.",

    key_select: "Select",
    key_confirm: "Confirm",
    key_stay: "Stick",
    key_switch: "Switch",
    key_play_again: "Play Again",
    key_run: "Run",
    key_trials: "Trials",
    key_mode: "Mode",
    key_tab: "Tab",
    key_doors: "Doors",
    key_home: "Home/Reset",
    key_start: "Start",
    key_quit: "Quit",
};

pub static JAPANESE: Text = Text {
    title: "学習の認知科学：対話的な確率の可視化",
    intro_title: "なぜ「探索可能な説明」なのか？",
    intro: &[
        "本プロジェクトは Explorable Explanations（Nicky Case らが提唱）に触発されました。",
        "通常、私たちは数学の定理を公式の暗記によって学ぼうとします。",
        "探索可能な説明では、まずシステムを触って遊ぶことで直感を構築し、その後に理論を学びます。",
    ],
    rules_title: "実験：モンティ・ホール問題",
    rules: &[
        "1. 3つのドアがあります。1つはスーパーカー、残りはヤギです。",
        "2. あなたはドアを1つ選びます。",
        "3. 司会者（正解を知っている）は、残りのドアの1つを開けて必ずヤギを見せます。",
        "4. 司会者は尋ねます：「選んだドアを変えますか？ そのままにしますか？」",
        "多くの人は確率は50/50だと考えます。しかし「変更する」ほうが勝てる戦略なのです！",
    ],
    table_intro: "以下の論理を見てください。「変更」は3回中2回勝ちます。",
    table_header: ["ドア1 (選択)", "ドア2", "ドア3", "そのまま", "変更"],
    car: "車",
    goat: "ヤギ",
    win: "勝ち",
    lose: "負け",
    start: "実験を開始する",
    door_count: "ドアの枚数",

    play_tab: "ゲームをプレイ",
    simulation_tab: "シミュレーション (証明)",
    door: "ドア",
    host_name: "モンティ司会者",
    host_intro: "ショーへようこそ！ このドアのどれかに新車が隠されています...",
    host_reveal: "ハハ！ 見てください、そこにはヤギがいました！ さあ、あなたは直感を信じますか？",
    host_win: "信じられない！ 車を見つけました！",
    host_lose: "残念！ ヤギでした。",
    pick_prompt: "ドアを選んでください！ 車が隠されています。",
    door_input: "ドア番号",
    opened_doors: "司会者が開けたドア",
    switch_prompt: "司会者が「残り1枚」になるまでハズレのドアをすべて開けました！ 変更しますか？",
    you_picked: "あなたの選択",
    host_left_closed: "司会者が残したドア",
    you_won: "大当たり！ 車でした！",
    you_lost: "残念、ヤギでした。",
    car_was_behind: "車があったドア",

    score: "スコア",
    wins: "勝ち",
    losses: "負け",
    played: "プレイ数",
    win_rate: "勝率",

    trials: "試行回数",
    mode: "モード",
    stay_rate: "勝率 (そのまま)",
    switch_rate: "勝率 (変更)",
    theory: "理論値",
    no_simulation: "Enter でシミュレーションを実行します。",

    key_select: "選択",
    key_confirm: "決定",
    key_stay: "そのまま",
    key_switch: "変更",
    key_play_again: "もう一度",
    key_run: "実行",
    key_trials: "試行回数",
    key_mode: "モード",
    key_tab: "タブ",
    key_doors: "ドア枚数",
    key_home: "ホーム/リセット",
    key_start: "開始",
    key_quit: "終了",
};
