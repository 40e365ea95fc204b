//! Built-in content used for missing keys and after a reset.

use super::model::*;

const SAMPLE_1: &str = "sample-1.mp3";
const SAMPLE_2: &str = "sample-2.mp3";

fn s(v: &str) -> String {
    v.to_string()
}

fn avatar(name: &str, background: &str) -> String {
    format!(
        "https://ui-avatars.com/api/?name={}&background={background}",
        urlencoding::encode(name)
    )
}

pub fn news() -> Vec<NewsItem> {
    let items = [
        (
            "n1",
            "Coldplay Confirms Six Nights in Jakarta",
            "Music News",
            "1 hour ago",
            400,
            "After overwhelming demand the promoter added more dates. Get ready for another ticket war!",
        ),
        (
            "n2",
            "5 Hidden Gem Hangouts Downtown",
            "Lifestyle",
            "4 hours ago",
            435,
            "Bored of the mall? Cheap, cosy and photogenic places for your Saturday night.",
        ),
        (
            "n3",
            "We The Fest Announces Phase 1 Lineup",
            "Event Update",
            "6 hours ago",
            449,
            "The 1975, The Strokes and plenty more international acts are coming this year.",
        ),
        (
            "n4",
            "\"Barbie\" Breaks Global Box Office Records",
            "Pop Culture",
            "1 day ago",
            338,
            "Margot Robbie brings the iconic doll to life with a record-breaking opening week.",
        ),
        (
            "n5",
            "Jungkook Releases Solo Album \"Golden\"",
            "K-Pop",
            "2 days ago",
            331,
            "The Golden Maknae is set to dominate the global charts with his first solo album.",
        ),
        (
            "n6",
            "Money Tips for New Students",
            "Lifestyle",
            "4 days ago",
            531,
            "Don't blow it all at the start of the month: a few budgeting habits that actually stick.",
        ),
    ];

    items
        .into_iter()
        .map(|(id, title, category, date, pic, excerpt)| NewsItem {
            id: s(id),
            title: s(title),
            category: s(category),
            date: s(date),
            image_url: format!("https://picsum.photos/id/{pic}/600/400"),
            excerpt: s(excerpt),
        })
        .collect()
}

pub fn charts() -> Vec<ChartItem> {
    let songs = [
        ("c1", "Seven", "Jungkook ft. Latto", "3:04", Trend::Same),
        ("c2", "Super Shy", "NewJeans", "2:35", Trend::Up),
        ("c3", "Vampire", "Olivia Rodrigo", "3:40", Trend::Down),
        ("c4", "Paint The Town Red", "Doja Cat", "3:51", Trend::New),
        ("c5", "Cruel Summer", "Taylor Swift", "2:58", Trend::Up),
        ("c6", "What Was I Made For?", "Billie Eilish", "3:42", Trend::Down),
        ("c7", "Flowers", "Miley Cyrus", "3:21", Trend::Same),
        ("c8", "Dance The Night", "Dua Lipa", "2:56", Trend::New),
        ("c9", "Kill Bill", "SZA", "2:35", Trend::Up),
        ("c10", "As It Was", "Harry Styles", "2:47", Trend::Down),
    ];

    songs
        .into_iter()
        .enumerate()
        .map(|(i, (id, title, artist, duration, trend))| ChartItem {
            rank: i as u32 + 1,
            trend,
            song: Song {
                id: s(id),
                title: s(title),
                artist: s(artist),
                cover_url: format!("https://picsum.photos/id/{}/300/300", 500 + i),
                duration: s(duration),
                audio_url: Some(s(if i % 2 == 0 { SAMPLE_1 } else { SAMPLE_2 })),
            },
        })
        .collect()
}

pub fn podcasts() -> Vec<PodcastEpisode> {
    let episodes = [
        ("p1", "Late Night Confessions: Gen Z Dilemmas", "Lifestyle", "2 days ago", "45 Min", 145),
        ("p2", "Horror Story: The Old Office", "Horror", "3 days ago", "32 Min", 231),
        ("p3", "Movie Review: Oppenheimer vs Barbie", "Entertainment", "1 week ago", "50 Min", 338),
        ("p4", "Stand Up Hour: Just For Laughs", "Comedy", "1 day ago", "55 Min", 1025),
        ("p5", "Tech Talk: Is AI Taking Over?", "Talkshow", "12 hours ago", "60 Min", 1074),
    ];

    episodes
        .into_iter()
        .map(|(id, title, category, date, duration, pic)| PodcastEpisode {
            id: s(id),
            title: s(title),
            date: s(date),
            duration: s(duration),
            image_url: format!("https://picsum.photos/id/{pic}/300/300"),
            category: s(category),
            audio_url: None,
        })
        .collect()
}

pub fn shows() -> Vec<Show> {
    let shows = [
        (
            "s1",
            "Morning Drive with Ryo",
            "Ryo Wicaksono",
            "06:00 - 10:00",
            64,
            "Start the day with the biggest hits and the latest news.",
        ),
        (
            "s2",
            "Sunset Trip",
            "Julio & Genus",
            "16:00 - 20:00",
            91,
            "Your ride home from the office, with plenty of jokes.",
        ),
        (
            "s3",
            "Night Shift",
            "Eda Dharmawan",
            "20:00 - 24:00",
            129,
            "Request your favourite songs for a slow evening.",
        ),
        (
            "s4",
            "Top 40 Countdown",
            "Hanny Dini",
            "Saturday, 16:00",
            145,
            "The forty most requested songs of the week.",
        ),
        (
            "s5",
            "DJ Show: Electronic City",
            "DJ Pallas",
            "Friday, 22:00",
            180,
            "Party from home with the best EDM mixes.",
        ),
    ];

    shows
        .into_iter()
        .map(|(id, title, host, time, pic, description)| Show {
            id: s(id),
            title: s(title),
            host: s(host),
            time: s(time),
            image_url: format!("https://picsum.photos/id/{pic}/400/400"),
            description: s(description),
        })
        .collect()
}

pub fn poll() -> Poll {
    Poll {
        question: s("Which guest artist do you want in the studio next week?"),
        options: [
            ("o1", "Sheila on 7", 45),
            ("o2", "Tulus", 30),
            ("o3", "Nadin Amizah", 15),
            ("o4", "Hindia", 10),
        ]
        .into_iter()
        .map(|(id, text, votes)| PollOption {
            id: s(id),
            text: s(text),
            votes,
        })
        .collect(),
    }
}

pub fn networks() -> Vec<NetworkItem> {
    [
        ("Jakarta", "102.2 FM"),
        ("Bandung", "98.4 FM"),
        ("Surabaya", "89.3 FM"),
        ("Medan", "97.5 FM"),
        ("Makassar", "105.1 FM"),
        ("Yogyakarta", "95.8 FM"),
        ("Semarang", "102.0 FM"),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (city, freq))| NetworkItem {
        id: format!("net-{i}"),
        city: s(city),
        freq: s(freq),
    })
    .collect()
}

pub fn branding() -> Branding {
    Branding {
        site_title: s("ONAIR"),
        logo_url: String::new(),
        primary_color: s("#FFCD00"),
        favicon_url: None,
    }
}

pub fn about() -> AboutPage {
    AboutPage {
        hero: AboutHero {
            title_line1: s("MORE THAN"),
            title_line2: s("JUST"),
            highlight_word: s("RADIO"),
            subtitle: s("The number one hit music station. Home to a creative, restless, young audience."),
            bg_image: s("https://images.unsplash.com/photo-1478737270239-2f02b77ac6d5"),
            since_year: s("1971"),
        },
        story: AboutStory {
            title: s("The Legend of"),
            highlight_word: s("ONAIR"),
            description1: s(
                "It started in a small bedroom studio in 1971, where a few friends built something bigger than a radio signal.",
            ),
            description2: s(
                "Fifty years later the station is still where the country's biggest trends are born.",
            ),
            image: s("https://images.unsplash.com/photo-1598488035139-bdbb2231ce04"),
            stat1_value: s("50+"),
            stat1_label: s("Years on Air"),
            stat2_value: s("#1"),
            stat2_label: s("Youth Radio"),
        },
        dna: AboutDna {
            title: s("Our"),
            highlight_word: s("DNA"),
            subtitle: s("What makes us different?"),
            items: vec![
                DnaItem {
                    id: s("dna-1"),
                    title: s("HIT MUSIC"),
                    desc: s("Only the best hits from home and abroad."),
                    icon: s("Music"),
                },
                DnaItem {
                    id: s("dna-2"),
                    title: s("GEN Z SOUL"),
                    desc: s("Language, style and content that fit young lives today."),
                    icon: s("Users"),
                },
                DnaItem {
                    id: s("dna-3"),
                    title: s("CREATIVE HUB"),
                    desc: s("A stage for creators, musicians and young talent."),
                    icon: s("Award"),
                },
            ],
        },
        contact: Contact {
            address: s("Jl. Adityawarman No. 71, Jakarta"),
            email: s("hello@onair.fm"),
            phone: s("+62 21 720 2238"),
        },
    }
}

pub fn home() -> HomePage {
    HomePage {
        hero: HomeHero {
            tagline: s("On Air Now"),
            title: s("MORNING DRIVE WITH RYO"),
            description: s("Kick off your day with Ryo Wicaksono, full of energy and hit music!"),
            bg_image: s("https://picsum.photos/id/450/1200/800"),
            cta_text: s("Listen Now"),
            audio_url: Some(s(SAMPLE_1)),
        },
    }
}

pub fn notifications() -> Vec<Notification> {
    vec![
        Notification {
            id: s("notif-1"),
            title: s("Show Starting!"),
            message: s("Morning Drive with Ryo is on air. Tune in now!"),
            time: s("Just now"),
            read: false,
            kind: NotificationKind::Success,
        },
        Notification {
            id: s("notif-2"),
            title: s("New on the Chart"),
            message: s("\"Seven\" by Jungkook climbed to #1 this week."),
            time: s("1 hour ago"),
            read: false,
            kind: NotificationKind::Info,
        },
        Notification {
            id: s("notif-3"),
            title: s("Quiz Winner"),
            message: s("Congratulations @dinda_putri, you won Coldplay tickets!"),
            time: s("Today"),
            read: true,
            kind: NotificationKind::Alert,
        },
    ]
}

pub fn chat() -> Vec<ChatMessage> {
    vec![
        ChatMessage {
            id: s("msg-1"),
            user_id: s("admin"),
            user_name: s("ONAIR Admin"),
            user_avatar: avatar("ONAIR Admin", "FFCD00"),
            text: s("Hello listeners! What do you want to request today?"),
            timestamp: s("10:00"),
            role: ChatRole::Admin,
        },
        ChatMessage {
            id: s("msg-2"),
            user_id: s("u-1"),
            user_name: s("Dinda"),
            user_avatar: avatar("Dinda", "random"),
            text: s("Some Taylor Swift please!"),
            timestamp: s("10:02"),
            role: ChatRole::User,
        },
        ChatMessage {
            id: s("msg-3"),
            user_id: s("u-2"),
            user_name: s("Budi Santoso"),
            user_avatar: avatar("Budi Santoso", "random"),
            text: s("Shout out to everyone at SMA 3!"),
            timestamp: s("10:05"),
            role: ChatRole::User,
        },
    ]
}

pub fn current_user() -> User {
    User {
        id: s("u-current"),
        name: s("Listener"),
        email: s("member@onair.fm"),
        avatar: String::new(),
        bio: Some(s("Listening since 2010. Music, travel and good vibes!")),
        role: UserRole::Admin,
        status: UserStatus::Active,
        joined_date: s("2023-01-15"),
    }
}

pub fn users() -> Vec<User> {
    let mut users = vec![current_user()];
    let others = [
        ("u-1", "Dinda Putri", "dinda@example.com", "Music Lover", UserRole::User, UserStatus::Active, "2023-05-20"),
        ("u-2", "Budi Santoso", "budi.san@example.com", "Podcast Addict", UserRole::User, UserStatus::Active, "2023-06-10"),
        ("u-3", "Ryo Wicaksono", "ryo@onair.fm", "Morning Drive host", UserRole::Moderator, UserStatus::Active, "2022-01-01"),
        ("u-4", "Spammer Bot", "spam@bot.com", "Buy followers cheap", UserRole::User, UserStatus::Banned, "2023-08-01"),
    ];
    users.extend(
        others
            .into_iter()
            .map(|(id, name, email, bio, role, status, joined)| User {
                id: s(id),
                name: s(name),
                email: s(email),
                avatar: if status == UserStatus::Banned {
                    String::new()
                } else {
                    avatar(name, "random")
                },
                bio: Some(s(bio)),
                role,
                status,
                joined_date: s(joined),
            }),
    );
    users
}
