//! The bundled placeholder dataset.
//!
//! Twenty hand-curated records that stand in for live data when every
//! provider is down or unconfigured. Ids are real catalog ids, including
//! two inherited duplicates (55644 and 40028) that list synthesis papers
//! over by re-tagging ids positionally.

use animeta_models::AnimeRecord;

#[allow(clippy::too_many_arguments)]
fn entry(
    id: &str,
    title: &str,
    description: &str,
    short_description: &str,
    image: &str,
    video: &str,
    year: i32,
    rating: &str,
    episodes: u32,
    genres: &[&str],
    is_new_release: bool,
    is_trending: bool,
) -> AnimeRecord {
    AnimeRecord {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        short_description: short_description.to_string(),
        thumbnail: image.to_string(),
        background_image: image.to_string(),
        video_url: Some(video.to_string()),
        year,
        rating: rating.to_string(),
        episodes,
        genres: genres.iter().map(|g| g.to_string()).collect(),
        is_new_release,
        is_trending,
    }
}

pub fn bundled_records() -> Vec<AnimeRecord> {
    vec![
        entry(
            "1535",
            "Death Note",
            "A shinigami, as a god of death, can kill anyone—provided they see their victim's face and write their victim's name in a notebook called a Death Note. One day, Ryuk, bored by the shinigami lifestyle and interested in seeing how a human would use a Death Note, drops one into the human realm.",
            "A high school student discovers a supernatural notebook that grants its user the ability to kill.",
            "https://cdn.myanimelist.net/images/anime/9/9453l.jpg",
            "/videos/death-note-trailer.mp4",
            2006,
            "8.6",
            37,
            &["mystery", "psychological", "supernatural", "thriller"],
            false,
            true,
        ),
        entry(
            "16498",
            "Attack on Titan",
            "Centuries ago, mankind was slaughtered to near extinction by monstrous humanoid creatures called Titans, forcing humans to hide in fear behind enormous concentric walls. What makes these giants truly terrifying is that their taste for human flesh is not born out of hunger but what appears to be out of pleasure.",
            "Humans are nearly extinct, living behind walls protecting them from giant humanoid Titans.",
            "https://cdn.myanimelist.net/images/anime/10/47347l.jpg",
            "/videos/aot-trailer.mp4",
            2013,
            "8.5",
            25,
            &["action", "drama", "fantasy"],
            false,
            true,
        ),
        entry(
            "1575",
            "Code Geass: Lelouch of the Rebellion",
            "In the year 2010, the Holy Empire of Britannia is establishing itself as a dominant military nation, starting with the conquest of Japan. Renamed to Area 11 after its swift defeat, Japan has seen significant resistance against these tyrants in an attempt to regain independence.",
            "An exiled prince gains the power of absolute obedience to take down the Britannian Empire.",
            "https://cdn.myanimelist.net/images/anime/5/50331l.jpg",
            "/videos/code-geass-trailer.mp4",
            2006,
            "8.7",
            25,
            &["action", "drama", "mecha", "sci-fi", "thriller"],
            false,
            true,
        ),
        entry(
            "52991",
            "Sousou no Frieren",
            "The demon king has been defeated, and the victorious hero party returns home before disbanding. The four—mage Frieren, hero Himmel, priest Heiter, and warrior Eisen—reminisce about their decade-long journey as the moment to bid each other farewell arrives. But the passing of time is different for elves, thus Frieren witnesses her companions slowly pass away one by one.",
            "After the defeat of the demon king, elf mage Frieren embarks on a journey of remembrance.",
            "https://cdn.myanimelist.net/images/anime/1015/138006l.jpg",
            "/videos/frieren-trailer.mp4",
            2023,
            "9.0",
            28,
            &["adventure", "drama", "fantasy"],
            true,
            true,
        ),
        entry(
            "51009",
            "Jujutsu Kaisen 2nd Season",
            "The second season of Jujutsu Kaisen, covering the \"Kaigyoku/Gyokusetsu\" arc and the \"Shibuya Incident\" arc.",
            "The story of Jujutsu Kaisen continues, covering the \"Shibuya Incident\" arc.",
            "https://cdn.myanimelist.net/images/anime/1792/138022l.jpg",
            "/videos/jjk-s2-trailer.mp4",
            2023,
            "8.7",
            23,
            &["action", "fantasy"],
            true,
            true,
        ),
        entry(
            "9969",
            "Fullmetal Alchemist: Brotherhood",
            "After a horrific alchemy experiment goes wrong in the Elric household, brothers Edward and Alphonse are left in a catastrophic situation. Trying to resurrect their mother, Edward loses his arm and leg, and Alphonse loses his entire body. Now Edward joins the military to search for the philosopher's stone to restore their bodies.",
            "Two brothers search for the Philosopher's Stone to restore their bodies after a failed alchemical ritual.",
            "https://cdn.myanimelist.net/images/anime/1223/96541l.jpg",
            "/videos/fmab-trailer.mp4",
            2009,
            "9.1",
            64,
            &["action", "adventure", "drama", "fantasy"],
            false,
            true,
        ),
        entry(
            "30276",
            "One Punch Man",
            "Saitama has a rather peculiar hobby, being a hero. In order to pursue his childhood dream, Saitama relentlessly trained for three years, losing all of his hair in the process. Now, Saitama is so powerful, he can defeat any enemy with just one punch. However, having no one capable of matching his strength has led Saitama to an unexpected problem—he is no longer able to enjoy the thrill of battling and has become quite bored.",
            "A superhero who can defeat any opponent with a single punch seeks a worthy opponent after growing bored with his powers.",
            "https://cdn.myanimelist.net/images/anime/12/76049l.jpg",
            "/videos/one-punch-man-trailer.mp4",
            2015,
            "8.5",
            12,
            &["action", "comedy", "sci-fi", "supernatural"],
            false,
            true,
        ),
        entry(
            "1735",
            "Naruto: Shippuuden",
            "It has been two and a half years since Naruto Uzumaki left Konohagakure, the Hidden Leaf Village, for intense training following events which fueled his desire to be stronger. Now Akatsuki, the mysterious organization of elite rogue ninja, is closing in on their grand plan which may threaten the safety of the entire shinobi world.",
            "After training for two years, Naruto returns to face new challenges and the looming threat of the Akatsuki.",
            "https://cdn.myanimelist.net/images/anime/5/17407l.jpg",
            "/videos/naruto-shippuden-trailer.mp4",
            2007,
            "8.2",
            500,
            &["action", "adventure", "comedy", "shounen"],
            false,
            true,
        ),
        entry(
            "55644",
            "Blue Lock: Second Season",
            "Second season of Blue Lock.",
            "The intense race to become Japan's striker continues in the second season.",
            "https://cdn.myanimelist.net/images/anime/1332/139398l.jpg",
            "/videos/blue-lock-s2-trailer.mp4",
            2024,
            "8.4",
            13,
            &["sports", "drama", "shounen"],
            true,
            true,
        ),
        entry(
            "55644",
            "Solo Leveling",
            "In a world where hunters — humans who possess magical abilities — must battle deadly monsters to protect humanity, Sung Jinwoo is known as the \"World's Weakest Hunter.\" Jinwoo is the laughingstock of the entire hunter community, and is considered too weak to join elite guilds. However, a mysterious System chooses him as its sole player.",
            "The world's weakest hunter is granted a mysterious opportunity to level up in a way no other hunter can.",
            "https://cdn.myanimelist.net/images/anime/1823/132323l.jpg",
            "/videos/solo-leveling-trailer.mp4",
            2024,
            "8.5",
            12,
            &["action", "adventure", "fantasy"],
            true,
            true,
        ),
        entry(
            "813",
            "Dragon Ball Z",
            "Five years after winning the World Martial Arts tournament, Goku is now living a peaceful life with his wife and son. This changes, however, with the arrival of a mysterious enemy named Raditz who presents himself as Goku's long-lost brother. He reveals that Goku is a warrior from the once powerful but now virtually extinct Saiyan race.",
            "Goku and his friends defend Earth from various threats including aliens, androids, and other cosmic entities.",
            "https://cdn.myanimelist.net/images/anime/1607/117271l.jpg",
            "/videos/dragon-ball-z-trailer.mp4",
            1989,
            "8.2",
            291,
            &["action", "adventure", "fantasy", "martial arts", "shounen"],
            false,
            false,
        ),
        entry(
            "19815",
            "No Game No Life",
            "Genius gamer siblings Sora and Shiro are shut-ins who are known in the online gaming world as \"Blank,\" an undefeatable duo. One day, they are challenged to a chess match by Tet, a god from another reality. The two win, and are offered the opportunity to live in a world that centers around games.",
            "Two genius gamer siblings are transported to a world where all conflicts are resolved through games.",
            "https://cdn.myanimelist.net/images/anime/1074/111944l.jpg",
            "/videos/no-game-no-life-trailer.mp4",
            2014,
            "8.1",
            12,
            &["adventure", "comedy", "fantasy", "ecchi"],
            false,
            false,
        ),
        entry(
            "22199",
            "Akame ga Kill!",
            "Tatsumi is a self-acknowledged country bumpkin who travels to the Capital to raise money for his impoverished village. After being robbed and left stranded, he is recruited by Night Raid, a group of assassins dedicated to eliminating corruption by mercilessly killing those responsible.",
            "A young man joins an assassin group to fight against a corrupt empire.",
            "https://cdn.myanimelist.net/images/anime/1429/95946l.jpg",
            "/videos/akame-ga-kill-trailer.mp4",
            2014,
            "7.5",
            24,
            &["action", "adventure", "drama", "fantasy", "horror"],
            false,
            false,
        ),
        entry(
            "40028",
            "Shingeki no Kyojin: The Final Season",
            "The war for Paradis zeroes in on Shiganshina just as Jaegerists have seized control. After taking a huge blow from a surprise attack led by Eren, Marley swiftly acts to return the favor. With Zeke's true plan revealed and a military forced under new rule, this battle might be fought on two fronts.",
            "Eren leads the charge against Marley as the war intensifies and truths are revealed.",
            "https://cdn.myanimelist.net/images/anime/1000/110531l.jpg",
            "/videos/aot-final-season-trailer.mp4",
            2020,
            "8.8",
            16,
            &["action", "drama", "mystery", "fantasy"],
            false,
            true,
        ),
        entry(
            "23755",
            "Nanatsu no Taizai",
            "The \"Seven Deadly Sins,\" a group of evil knights who conspired to overthrow the kingdom of Britannia, were said to have been eradicated by the Holy Knights. However, rumors persist that these legendary knights still live. Princess Elizabeth seeks their help to defeat the Holy Knights, who have staged a coup.",
            "A princess seeks the help of legendary knights to reclaim her kingdom from corrupt Holy Knights.",
            "https://cdn.myanimelist.net/images/anime/8/65409l.jpg",
            "/videos/seven-deadly-sins-trailer.mp4",
            2014,
            "7.9",
            24,
            &["action", "adventure", "fantasy", "magic", "shounen"],
            false,
            false,
        ),
        entry(
            "54970",
            "Delicious in Dungeon",
            "After losing his fortune and sister to a dungeon, hunter Laios and his party of companions journey into the dungeon to continue the search and rescue. With no money for rations, they'll have to consume what lurks beneath — the monsters themselves!",
            "A group of adventurers explores a deadly dungeon while cooking and eating the monsters they defeat.",
            "https://cdn.myanimelist.net/images/anime/1208/139312l.jpg",
            "/videos/delicious-in-dungeon-trailer.mp4",
            2024,
            "8.4",
            24,
            &["adventure", "comedy", "fantasy"],
            true,
            true,
        ),
        entry(
            "32182",
            "Mob Psycho 100",
            "Eighth-grader Shigeo \"Mob\" Kageyama has tapped into his inner wellspring of psychic prowess at a young age. But the power quickly proves to be a liability when he realizes the potential danger of his skills. Through an encounter with another psychic, Mob resolves to use his own powers for the betterment of others.",
            "A psychic middle schooler tries to live normally while keeping his powers in check.",
            "https://cdn.myanimelist.net/images/anime/5/82890l.jpg",
            "/videos/mob-psycho-trailer.mp4",
            2016,
            "8.5",
            12,
            &["action", "comedy", "supernatural"],
            false,
            false,
        ),
        entry(
            "40028",
            "Kimetsu no Yaiba",
            "Since ancient times, rumors have abounded of man-eating demons lurking in the woods. Because of this, the local townsfolk never venture outside at night. Legend has it that a demon slayer also roams the night, hunting down these bloodthirsty demons. Ever since the death of his father, Tanjirou has taken it upon himself to support his mother and five siblings.",
            "A young man becomes a demon slayer after his family is slaughtered and his sister is turned into a demon.",
            "https://cdn.myanimelist.net/images/anime/1286/99889l.jpg",
            "/videos/demon-slayer-trailer.mp4",
            2019,
            "8.5",
            26,
            &["action", "supernatural", "historical", "shounen"],
            false,
            true,
        ),
        entry(
            "45613",
            "Mushoku Tensei: Jobless Reincarnation",
            "When a 34-year-old unemployed man is killed by a speeding truck, he finds himself reincarnated in a magical world as Rudeus Greyrat, a newborn baby. With knowledge, experience, and regrets from his previous life retained, Rudeus vows to lead a fulfilling life in this new world, departing from his past mistakes.",
            "A middle-aged man is reincarnated in a fantasy world and resolves to make the most of his second chance.",
            "https://cdn.myanimelist.net/images/anime/1530/117776l.jpg",
            "/videos/mushoku-tensei-trailer.mp4",
            2021,
            "8.4",
            11,
            &["drama", "fantasy", "ecchi"],
            false,
            false,
        ),
        entry(
            "226",
            "Elfen Lied",
            "Lucy is a special breed of human referred to as \"Diclonius,\" born with a short pair of horns and invisible telekinetic hands that lands her as a victim of inhumane scientific experimentation by the government. However, once circumstances present her an opportunity to escape, Lucy, corrupted by the confinement and torture, unleashes a torrent of bloodshed as she escapes her captors.",
            "A dangerous mutant escapes from a government facility and develops a dual personality after injury.",
            "https://cdn.myanimelist.net/images/anime/1995/121599l.jpg",
            "/videos/elfen-lied-trailer.mp4",
            2004,
            "7.5",
            13,
            &["action", "drama", "horror", "psychological", "romance", "supernatural"],
            false,
            false,
        ),
    ]
}
